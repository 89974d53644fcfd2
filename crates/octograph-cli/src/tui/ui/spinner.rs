use ratatui::prelude::*;

const WIDTH: usize = 8;
const HOLD_START: usize = 30;
const HOLD_END: usize = 9;
const TRAIL_LENGTH: usize = 4;

const TRAIL_COLORS: &[Color] = &[
    Color::Rgb(57, 211, 83), // #39D353
    Color::Rgb(38, 166, 65), // #26A641
    Color::Rgb(0, 109, 50),  // #006D32
    Color::Rgb(14, 68, 41),  // #0E4429
];
const INACTIVE_COLOR: Color = Color::Rgb(68, 68, 68);

struct ScannerState {
    position: usize,
    forward: bool,
}

fn scanner_state(frame: usize) -> ScannerState {
    let forward_frames = WIDTH;
    let backward_frames = WIDTH - 1;
    let total_cycle = forward_frames + HOLD_END + backward_frames + HOLD_START;
    let normalized = frame % total_cycle;

    if normalized < forward_frames {
        ScannerState {
            position: normalized,
            forward: true,
        }
    } else if normalized < forward_frames + HOLD_END {
        ScannerState {
            position: WIDTH - 1,
            forward: true,
        }
    } else if normalized < forward_frames + HOLD_END + backward_frames {
        ScannerState {
            position: WIDTH - 2 - (normalized - forward_frames - HOLD_END),
            forward: false,
        }
    } else {
        ScannerState {
            position: 0,
            forward: false,
        }
    }
}

pub fn scanner_spans(frame: usize) -> Vec<Span<'static>> {
    let state = scanner_state(frame);
    let mut spans = Vec::with_capacity(WIDTH);

    for i in 0..WIDTH {
        let distance = if state.forward {
            if state.position >= i {
                state.position - i
            } else {
                usize::MAX
            }
        } else if i >= state.position {
            i - state.position
        } else {
            usize::MAX
        };

        let (ch, color) = if distance < TRAIL_LENGTH {
            ('■', TRAIL_COLORS[distance])
        } else {
            ('⬝', INACTIVE_COLOR)
        };

        spans.push(Span::styled(ch.to_string(), Style::default().fg(color)));
    }

    spans
}
