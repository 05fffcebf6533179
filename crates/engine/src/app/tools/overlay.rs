use crate::app::{draw_text_extent, LoopMetricsSnapshot, Rect, Renderer, Rgba, Vec2};

const TEXT_SCALE: i32 = 2;
const LINE_ADVANCE: f32 = (7 * TEXT_SCALE) as f32;
const OVERLAY_PADDING: f32 = (6 * TEXT_SCALE) as f32;
const OVERLAY_PANEL_INSET_X: f32 = (4 * TEXT_SCALE) as f32;
const OVERLAY_PANEL_INSET_Y: f32 = (3 * TEXT_SCALE) as f32;
const OVERLAY_TEXT_PRIMARY_COLOR: Rgba = [244, 248, 252, 255];
const OVERLAY_TEXT_DIM_COLOR: Rgba = [176, 198, 220, 255];
const OVERLAY_PANEL_BG_COLOR: Rgba = [10, 12, 16, 255];
const OVERLAY_PANEL_BORDER_COLOR: Rgba = [92, 106, 126, 255];

#[derive(Debug, Clone)]
pub(crate) struct OverlayData {
    pub metrics: LoopMetricsSnapshot,
    pub render_fps_cap: Option<u32>,
    pub slow_frame_delay_ms: u64,
    pub scene_name: &'static str,
    pub scene_lines: Vec<String>,
}

pub(crate) fn draw_overlay(renderer: &mut dyn Renderer, data: &OverlayData) {
    let lines = build_overlay_lines(data);
    let widest = lines
        .iter()
        .map(|line| draw_text_extent(line, TEXT_SCALE).0)
        .max()
        .unwrap_or(0);
    if widest == 0 {
        return;
    }

    let panel = Rect::new(
        OVERLAY_PADDING - OVERLAY_PANEL_INSET_X,
        OVERLAY_PADDING - OVERLAY_PANEL_INSET_Y,
        widest as f32 + OVERLAY_PANEL_INSET_X * 2.0,
        lines.len() as f32 * LINE_ADVANCE + OVERLAY_PANEL_INSET_Y * 2.0,
    );
    renderer.fill_rect(panel, OVERLAY_PANEL_BG_COLOR);
    renderer.outline_rect(panel, 1.0, OVERLAY_PANEL_BORDER_COLOR);

    let mut y = OVERLAY_PADDING;
    for line in &lines {
        renderer.draw_text(
            Vec2::new(OVERLAY_PADDING, y),
            line,
            TEXT_SCALE,
            overlay_line_color(line),
        );
        y += LINE_ADVANCE;
    }
}

fn build_overlay_lines(data: &OverlayData) -> Vec<String> {
    let mut lines = vec![
        format_fps_line(
            data.metrics.fps,
            data.render_fps_cap,
            data.slow_frame_delay_ms,
        ),
        format!("TPS: {:.1}", data.metrics.tps),
        format!("FRAME: {:.2} MS", data.metrics.frame_time_ms),
        format!("TICKS: {}", data.metrics.total_ticks),
        String::new(),
        data.scene_name.to_string(),
    ];
    lines.extend(data.scene_lines.iter().cloned());
    lines
}

fn overlay_line_color(line: &str) -> Rgba {
    if line.contains(':') {
        OVERLAY_TEXT_DIM_COLOR
    } else {
        OVERLAY_TEXT_PRIMARY_COLOR
    }
}

fn format_fps_line(current_fps: f32, cap: Option<u32>, slow_frame_delay_ms: u64) -> String {
    let cap_text = match cap {
        Some(value) => value.to_string(),
        None => "OFF".to_string(),
    };
    let mut line = format!("FPS: {current_fps:.1} (CAP {cap_text})");
    if slow_frame_delay_ms > 0 {
        line.push_str(&format!(" +{slow_frame_delay_ms}MS"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Canvas, DrawCall, RecordingRenderer, Viewport};

    fn overlay_data() -> OverlayData {
        OverlayData {
            metrics: LoopMetricsSnapshot {
                fps: 59.9,
                tps: 60.0,
                frame_time_ms: 16.7,
                total_ticks: 120,
            },
            render_fps_cap: Some(60),
            slow_frame_delay_ms: 0,
            scene_name: "TOP-DOWN",
            scene_lines: vec!["POS: 400.0,300.0".to_string(), "FACING: 0".to_string()],
        }
    }

    #[test]
    fn fps_line_formats_cap_on_and_debug_delay() {
        assert_eq!(format_fps_line(59.9, Some(60), 12), "FPS: 59.9 (CAP 60) +12MS");
    }

    #[test]
    fn fps_line_formats_cap_off() {
        assert_eq!(format_fps_line(144.0, None, 0), "FPS: 144.0 (CAP OFF)");
    }

    #[test]
    fn overlay_lines_end_with_scene_lines() {
        let lines = build_overlay_lines(&overlay_data());
        assert_eq!(lines[1], "TPS: 60.0");
        assert_eq!(lines[3], "TICKS: 120");
        assert_eq!(&lines[lines.len() - 2..], ["POS: 400.0,300.0", "FACING: 0"]);
    }

    #[test]
    fn overlay_draws_panel_then_one_text_call_per_line() {
        let mut recorder = RecordingRenderer::new(Viewport {
            width: 800,
            height: 600,
        });
        let data = overlay_data();
        draw_overlay(&mut recorder, &data);

        let calls = recorder.calls();
        assert!(matches!(calls[0], DrawCall::FillRect { .. }));
        assert!(matches!(calls[1], DrawCall::OutlineRect { .. }));
        let text_calls = calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Text { .. }))
            .count();
        assert_eq!(text_calls, build_overlay_lines(&data).len());
    }

    #[test]
    fn overlay_writes_backing_plate_pixels() {
        let mut canvas = Canvas::new(320, 240);
        draw_overlay(&mut canvas, &overlay_data());
        assert_eq!(
            canvas.pixel(OVERLAY_PADDING as u32 - 2, OVERLAY_PADDING as u32 - 2),
            Some(OVERLAY_PANEL_BG_COLOR)
        );
    }
}
