// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end record/replay tests against the call-tracing reference sink.

use scrawl_canvas::{
    BlendMode, Canvas, ClipOp, Color, Data, IRect, Image, Lattice, LatticeRectType, Matrix, Paint,
    Path, Point, PointMode, Rect, Region, RoundRect, RsTransform,
};
use scrawl_canvas_ref::{CallSink, CanvasCall};
use scrawl_record::{
    CheckedWriter, CommandBuffer, Opcode, RawWriter, Recorder, WireError, play, play_checked,
};

fn red() -> Paint {
    Paint::with_color(Color::RED)
}

fn checker_image() -> Image {
    Image::new(2, 2, vec![0_u8; 16])
}

/// Drive a canvas through a workload touching most operand shapes.
fn kitchen_sink(canvas: &mut dyn Canvas) {
    canvas.save();
    canvas.translate(10.0, 20.0);
    canvas.rotate_degrees(45.0);
    canvas.concat(&Matrix::from_scale(2.0, 3.0));
    canvas.clip_rect(&Rect::from_xywh(0.0, 0.0, 100.0, 100.0), ClipOp::Intersect, true);
    canvas.clear(Color::WHITE);
    canvas.draw_color(Color::RED, BlendMode::Multiply);
    canvas.draw_line(0.0, 0.0, 10.0, 10.0, &red());
    canvas.draw_points(
        PointMode::Polygon,
        &[Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(0.0, 5.0)],
        &red(),
    );
    canvas.draw_oval(&Rect::from_xywh(1.0, 1.0, 4.0, 2.0), &red());
    canvas.draw_round_rect(
        &RoundRect::from_rect_xy(Rect::from_xywh(0.0, 0.0, 10.0, 10.0), 2.0, 2.0),
        &red(),
    );
    canvas.draw_region(
        &Region::from_rect(IRect::new(0, 0, 4, 4)),
        &red(),
    );
    canvas.draw_path(&Path::rect(Rect::from_xywh(0.0, 0.0, 3.0, 3.0)), &red());
    canvas.draw_image(&checker_image(), 7.0, 8.0, None);
    canvas.draw_image_rect_src(
        &checker_image(),
        Some(&Rect::from_xywh(0.0, 0.0, 1.0, 1.0)),
        &Rect::from_xywh(0.0, 0.0, 50.0, 50.0),
        Some(&red()),
    );
    canvas.draw_image_lattice(
        &checker_image(),
        &Lattice {
            bounds: Some(IRect::new(0, 0, 2, 2)),
            colors: [Color::BLACK].as_slice().into(),
            x_divs: [1].as_slice().into(),
            y_divs: [1].as_slice().into(),
            rect_types: [LatticeRectType::Default].as_slice().into(),
        },
        &Rect::from_xywh(0.0, 0.0, 20.0, 20.0),
        None,
    );
    canvas.draw_patch(
        &[Point::new(0.0, 0.0); 12],
        Some(&[Color::RED, Color::WHITE, Color::BLACK, Color::RED]),
        None,
        BlendMode::SrcOver,
        &red(),
    );
    canvas.draw_atlas(
        &checker_image(),
        &[RsTransform::default(), RsTransform::default()],
        &[Rect::from_xywh(0.0, 0.0, 1.0, 1.0), Rect::from_xywh(1.0, 1.0, 1.0, 1.0)],
        None,
        BlendMode::SrcOver,
        Some(&Rect::from_xywh(0.0, 0.0, 64.0, 64.0)),
        Some(&red()),
    );
    canvas.draw_annotation(
        &Rect::from_xywh(0.0, 0.0, 5.0, 5.0),
        "scrawl:tooltip",
        Some(&Data::new(b"hello".as_slice())),
    );
    canvas.restore();
    canvas.flush();
}

#[test]
fn replay_reproduces_the_exact_call_sequence() {
    let mut live = CallSink::new();
    let mut recorder = Recorder::<RawWriter>::new(&mut live);
    recorder.save();
    recorder.draw_rect(&Rect::from_xywh(0.0, 0.0, 10.0, 10.0), &red());
    recorder.restore();
    let buffer = recorder.finish().expect("clean recording");

    let mut replayed = CallSink::new();
    play(&buffer, &mut replayed).expect("replay succeeds");

    let expected = [
        CanvasCall::Save,
        CanvasCall::DrawRect {
            rect: Rect::from_xywh(0.0, 0.0, 10.0, 10.0),
            paint: red(),
        },
        CanvasCall::Restore,
    ];
    assert_eq!(live.calls(), &expected, "recording forwarded faithfully");
    assert_eq!(replayed.calls(), &expected, "replay decoded faithfully");
}

#[test]
fn kitchen_sink_survives_a_raw_round_trip() {
    let mut live = CallSink::new();
    let mut recorder = Recorder::<RawWriter>::new(&mut live);
    kitchen_sink(&mut recorder);
    let buffer = recorder.finish().expect("clean recording");

    let mut replayed = CallSink::new();
    play(&buffer, &mut replayed).expect("replay succeeds");

    assert_eq!(
        replayed.calls(),
        live.calls(),
        "every operand shape decodes to what was forwarded"
    );
    assert_eq!(
        replayed.total_matrix(),
        live.total_matrix(),
        "state tracking agrees after replay"
    );
}

#[test]
fn kitchen_sink_survives_a_checked_round_trip() {
    let mut live = CallSink::new();
    let mut recorder = Recorder::<CheckedWriter>::new(&mut live);
    kitchen_sink(&mut recorder);
    let buffer = recorder.finish().expect("clean recording");

    let mut replayed = CallSink::new();
    play_checked(&buffer, &mut replayed).expect("checked replay succeeds");

    assert_eq!(replayed.calls(), live.calls(), "channels agree on semantics");
}

#[test]
fn absent_paint_stays_absent() {
    let mut live = CallSink::new();
    let mut recorder = Recorder::<RawWriter>::new(&mut live);
    recorder.draw_image(&checker_image(), 1.0, 2.0, None);
    let buffer = recorder.finish().expect("clean recording");

    let mut replayed = CallSink::new();
    play(&buffer, &mut replayed).expect("replay succeeds");

    assert_eq!(
        replayed.calls(),
        &[CanvasCall::DrawImage {
            image: checker_image(),
            x: 1.0,
            y: 2.0,
            paint: None,
        }],
        "a null paint is not conflated with a default paint"
    );
}

#[test]
fn replay_is_repeatable_and_additive() {
    let mut live = CallSink::new();
    let mut recorder = Recorder::<RawWriter>::new(&mut live);
    recorder.draw_circle(5.0, 5.0, 2.0, &red());
    recorder.draw_circle(9.0, 9.0, 1.0, &red());
    let buffer = recorder.finish().expect("clean recording");

    let mut first = CallSink::new();
    let mut second = CallSink::new();
    play(&buffer, &mut first).expect("first replay");
    play(&buffer, &mut second).expect("second replay");
    assert_eq!(first.calls(), second.calls(), "replays of one buffer agree");

    play(&buffer, &mut first).expect("replay onto a used sink");
    assert_eq!(
        first.calls().len(),
        4,
        "replaying twice into one sink appends, it does not replace"
    );
}

#[test]
fn concurrent_replay_of_a_shared_buffer() {
    let mut live = CallSink::new();
    let mut recorder = Recorder::<RawWriter>::new(&mut live);
    kitchen_sink(&mut recorder);
    let buffer = recorder.finish().expect("clean recording");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let buffer = buffer.clone();
            std::thread::spawn(move || {
                let mut sink = CallSink::new();
                play(&buffer, &mut sink).expect("replay succeeds");
                sink.take_calls()
            })
        })
        .collect();

    for handle in handles {
        let calls = handle.join().expect("thread completes");
        assert_eq!(calls, live.calls(), "each thread decoded the same stream");
    }
}

#[test]
fn snapshot_is_independent_of_later_recording() {
    let mut live = CallSink::new();
    let mut recorder = Recorder::<RawWriter>::new(&mut live);
    recorder.save();
    let early = recorder.snapshot().expect("clean log");
    recorder.draw_paint(&red());
    recorder.restore();

    let mut replayed = CallSink::new();
    play(&early, &mut replayed).expect("replay of the early snapshot");
    assert_eq!(
        replayed.calls(),
        &[CanvasCall::Save],
        "later recording never leaks into an earlier snapshot"
    );
}

#[test]
fn truncated_command_fails_without_a_partial_call() {
    let mut live = CallSink::new();
    let mut recorder = Recorder::<RawWriter>::new(&mut live);
    recorder.save();
    recorder.draw_rect(&Rect::from_xywh(0.0, 0.0, 10.0, 10.0), &red());
    let buffer = recorder.finish().expect("clean recording");

    let cut = CommandBuffer::from_bytes(&buffer.bytes()[..buffer.len() - 3]);
    let mut replayed = CallSink::new();
    let err = play(&cut, &mut replayed).expect_err("truncation must fail");
    assert!(
        matches!(err, WireError::UnexpectedEof { .. }),
        "got {err:?}"
    );
    assert_eq!(
        replayed.calls(),
        &[CanvasCall::Save],
        "the complete leading command applied, the truncated one did not"
    );
}

#[test]
fn unknown_opcode_stops_replay() {
    let mut bytes = Vec::new();
    bytes.push(Opcode::Save as u8);
    bytes.push(0xFF);
    let buffer = CommandBuffer::from_bytes(bytes);

    let mut replayed = CallSink::new();
    let err = play(&buffer, &mut replayed).expect_err("unknown opcode must fail");
    assert_eq!(err, WireError::UnknownOpcode(0xFF));
    assert_eq!(replayed.calls(), &[CanvasCall::Save]);
}

#[test]
fn out_of_range_enum_byte_is_rejected() {
    let mut live = CallSink::new();
    let mut recorder = Recorder::<RawWriter>::new(&mut live);
    recorder.draw_color(Color::RED, BlendMode::SrcOver);
    let buffer = recorder.finish().expect("clean recording");

    // Command layout: opcode, 4-byte color, 1-byte blend mode.
    let mut bytes = buffer.bytes().to_vec();
    bytes[5] = 0xAA;
    let corrupted = CommandBuffer::from_bytes(bytes);

    let mut replayed = CallSink::new();
    let err = play(&corrupted, &mut replayed).expect_err("bad enum byte must fail");
    assert!(
        matches!(err, WireError::InvalidEnum { raw: 0xAA, .. }),
        "got {err:?}"
    );
    assert!(replayed.calls().is_empty(), "nothing was applied");
}

#[test]
fn checked_replay_pinpoints_a_type_divergence() {
    let mut live = CallSink::new();
    let mut recorder = Recorder::<CheckedWriter>::new(&mut live);
    recorder.translate(1.0, 2.0);
    let buffer = recorder.finish().expect("clean recording");

    // Checked layout: [u8 tag][opcode] then [f32 tag][dx bytes]... The
    // first operand's tag sits at offset 2; retagging it as i32 must be
    // caught before any payload is read.
    let mut bytes = buffer.bytes().to_vec();
    bytes[2] = 3; // the i32 type tag
    let corrupted = CommandBuffer::from_bytes(bytes);

    let mut replayed = CallSink::new();
    let err = play_checked(&corrupted, &mut replayed).expect_err("retagged stream must fail");
    assert!(
        matches!(err, WireError::TagMismatch { offset: 2, .. }),
        "got {err:?}"
    );
    assert!(replayed.calls().is_empty(), "nothing was applied");
}

#[test]
fn raw_buffer_is_not_accepted_by_the_checked_player() {
    let mut live = CallSink::new();
    let mut recorder = Recorder::<RawWriter>::new(&mut live);
    recorder.translate(1.0, 2.0);
    let buffer = recorder.finish().expect("clean recording");

    let mut replayed = CallSink::new();
    play_checked(&buffer, &mut replayed).expect_err("channel formats are not interchangeable");
    assert!(replayed.calls().is_empty(), "nothing was applied");
}

#[test]
fn picture_round_trips_through_the_resource_form() {
    let mut live = CallSink::new();
    let mut recorder = Recorder::<RawWriter>::new(&mut live);
    recorder.draw_rect(&Rect::from_xywh(0.0, 0.0, 1.0, 1.0), &red());
    let buffer = recorder.finish().expect("clean recording");
    let picture = buffer.to_picture();

    let mut outer_live = CallSink::new();
    let mut outer = Recorder::<RawWriter>::new(&mut outer_live);
    outer.draw_picture(&picture);
    let outer_buffer = outer.finish().expect("clean recording");

    let mut replayed = CallSink::new();
    play(&outer_buffer, &mut replayed).expect("replay succeeds");
    let [CanvasCall::DrawPicture { picture: decoded }] = replayed.calls() else {
        panic!("expected a single picture draw, got {:?}", replayed.calls());
    };
    let inner = CommandBuffer::from_bytes(decoded.canonical_bytes());
    let mut inner_sink = CallSink::new();
    play(&inner, &mut inner_sink).expect("nested replay succeeds");
    assert_eq!(
        inner_sink.calls(),
        live.calls(),
        "a picture carries a replayable command stream"
    );
}
