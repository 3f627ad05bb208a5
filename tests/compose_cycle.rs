use std::sync::Arc;

use blitline::{
    Animation, Blit, Frame, FrameIndex, SpriteSheet, Timeline, render_frame,
};

/// Sheet laid out like the encoder's output: a full-surface strip at the top,
/// patch rects packed below it. Every pixel encodes its sheet coordinates.
fn packed_sheet(width: u32, height: u32) -> SpriteSheet {
    let mut rgba8 = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            rgba8.extend_from_slice(&[x as u8, y as u8, 7, 255]);
        }
    }
    SpriteSheet {
        width,
        height,
        rgba8: Arc::new(rgba8),
    }
}

fn pulse_timeline() -> Timeline {
    Timeline {
        frames: vec![
            Frame {
                delay_ms: 500,
                blits: vec![Blit::from([0, 0, 6, 4, 0, 0])],
            },
            Frame {
                delay_ms: 500,
                blits: vec![Blit::from([0, 4, 2, 2, 1, 1])],
            },
            Frame {
                delay_ms: 1000,
                blits: vec![Blit::from([3, 4, 2, 2, 1, 1]), Blit::from([0, 6, 1, 1, 5, 3])],
            },
            Frame {
                delay_ms: 500,
                blits: vec![Blit::from([0, 4, 2, 2, 1, 1])],
            },
            Frame {
                delay_ms: 500,
                blits: vec![Blit::from([0, 0, 6, 4, 0, 0])],
            },
        ],
    }
}

#[test]
fn seek_and_step_agree_across_the_whole_cycle() {
    let anim = Animation::new(pulse_timeline(), packed_sheet(6, 8)).unwrap();
    let mut player = anim.player().unwrap();

    for i in 0..anim.frame_count() as u64 {
        player.step().unwrap();
        let seek = render_frame(&anim, FrameIndex(i)).unwrap();
        assert_eq!(
            player.surface().as_rgba8(),
            seek.as_rgba8(),
            "player and seek diverge at frame {i}"
        );
    }
}

#[test]
fn deltas_persist_until_overwritten() {
    let anim = Animation::new(pulse_timeline(), packed_sheet(6, 8)).unwrap();

    // Frame 2's second blit paints (5,3); frame 3 does not touch it.
    let f2 = render_frame(&anim, FrameIndex(2)).unwrap();
    let f3 = render_frame(&anim, FrameIndex(3)).unwrap();
    assert_eq!(f2.pixel(5, 3), Some([0, 6, 7, 255]));
    assert_eq!(f3.pixel(5, 3), Some([0, 6, 7, 255]));

    // The full-surface repaint of the closing frame clears it again.
    let f4 = render_frame(&anim, FrameIndex(4)).unwrap();
    assert_eq!(f4.pixel(5, 3), Some([5, 3, 7, 255]));
}

#[test]
fn closed_loop_first_and_last_frames_are_pixel_identical() {
    let anim = Animation::new(pulse_timeline(), packed_sheet(6, 8)).unwrap();
    assert!(anim.timeline().closes_loop());

    let first = render_frame(&anim, FrameIndex(0)).unwrap();
    let last = render_frame(&anim, FrameIndex(anim.frame_count() as u64 - 1)).unwrap();
    assert_eq!(first.as_rgba8(), last.as_rgba8());
}

#[test]
fn second_cycle_replays_the_first() {
    let anim = Animation::new(pulse_timeline(), packed_sheet(6, 8)).unwrap();
    let mut player = anim.player().unwrap();

    let mut first_cycle = Vec::new();
    for _ in 0..anim.frame_count() {
        player.step().unwrap();
        first_cycle.push(player.surface().as_rgba8().to_vec());
    }

    // The wrap lands on the same pixels without a rewind because the closing
    // frame repainted frame 0's content.
    for (i, expected) in first_cycle.iter().enumerate() {
        let timing = player.step().unwrap();
        assert_eq!(timing.index, FrameIndex(i as u64));
        assert_eq!(player.surface().as_rgba8(), expected.as_slice());
    }
}

#[test]
fn hold_frames_change_nothing() {
    let mut timeline = pulse_timeline();
    timeline.frames.insert(
        2,
        Frame {
            delay_ms: 250,
            blits: vec![],
        },
    );
    let anim = Animation::new(timeline, packed_sheet(6, 8)).unwrap();

    let before = render_frame(&anim, FrameIndex(1)).unwrap();
    let held = render_frame(&anim, FrameIndex(2)).unwrap();
    assert_eq!(before.as_rgba8(), held.as_rgba8());
}
