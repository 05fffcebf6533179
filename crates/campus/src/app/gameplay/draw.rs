use map_engine::{draw_text_extent, Renderer, Vec2};

use super::layout::{Building, CampusLayout, CarPark, Structure, LABEL_GAP, LABEL_SCALE};

const SIGN_TEXT_SCALE: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SceneStyle {
    pub(crate) labels: bool,
}

/// Draws the static map, structures in layout order, then labels if enabled.
/// Without labels the canteen sign is a blank plate.
pub(crate) fn draw_campus(renderer: &mut dyn Renderer, layout: &CampusLayout, style: SceneStyle) {
    for structure in layout.structures() {
        draw_structure(renderer, structure, style);
    }

    if style.labels {
        for (text, body) in layout.structures().iter().filter_map(Structure::label) {
            let (width, _) = draw_text_extent(text, LABEL_SCALE);
            let origin = Vec2::new(
                (body.center().x - width as f32 * 0.5).round(),
                body.bottom() + LABEL_GAP,
            );
            renderer.draw_text(origin, text, LABEL_SCALE, layout.label_color());
        }
    }
}

fn draw_structure(renderer: &mut dyn Renderer, structure: &Structure, style: SceneStyle) {
    match structure {
        Structure::Ground { rect, color } | Structure::Path { rect, color } => {
            renderer.fill_rect(*rect, *color);
        }
        Structure::Wall {
            rect,
            thickness,
            color,
        } => renderer.outline_rect(*rect, *thickness, *color),
        Structure::Building(building) => draw_building(renderer, building, style),
        Structure::CarPark(car_park) => draw_car_park(renderer, car_park),
        Structure::Tree {
            center,
            radius,
            color,
        } => renderer.fill_circle(*center, *radius, *color),
    }
}

fn draw_building(renderer: &mut dyn Renderer, building: &Building, style: SceneStyle) {
    renderer.fill_rect(building.body, building.color);
    for window in building.windows.rects(building.body) {
        renderer.fill_rect(window, building.windows.color);
    }
    renderer.fill_rect(building.door.rect(building.body), building.door.color);

    if let Some(sign) = &building.sign {
        let rect = sign.rect(building.body);
        renderer.fill_rect(rect, sign.color);
        if !style.labels {
            return;
        }
        let (width, height) = draw_text_extent(sign.text, SIGN_TEXT_SCALE);
        let center = rect.center();
        renderer.draw_text(
            Vec2::new(
                (center.x - width as f32 * 0.5).round(),
                (center.y - height as f32 * 0.5).round(),
            ),
            sign.text,
            SIGN_TEXT_SCALE,
            sign.text_color,
        );
    }
}

fn draw_car_park(renderer: &mut dyn Renderer, car_park: &CarPark) {
    renderer.fill_rect(car_park.body, car_park.color);
    for (from, to) in car_park.divider_segments() {
        renderer.draw_line(from, to, car_park.divider_color);
    }
    renderer.outline_rect(
        car_park.body,
        car_park.border_thickness,
        car_park.border_color,
    );
}
