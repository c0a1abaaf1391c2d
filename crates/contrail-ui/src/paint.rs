use contrail_core::ambient::AmbientPose;
use contrail_core::{RenderList, TimeLeft, Vec2};
use egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke};

use crate::Decoration;

const VIOLET: Color32 = Color32::from_rgb(0x7A, 0x5C, 0xFA);
const TEAL: Color32 = Color32::from_rgb(0x12, 0xFC, 0xD4);
const INDIGO: Color32 = Color32::from_rgb(0x5A, 0x35, 0xF2);
const BACKDROP: Color32 = Color32::from_rgb(0x0B, 0x0C, 0x10);
const GLOW_RINGS: usize = 12;

fn to_pos(origin: Pos2, point: Vec2) -> Pos2 {
    origin + egui::vec2(point.x, point.y)
}

pub(crate) fn backdrop(painter: &Painter, rect: egui::Rect) {
    painter.rect_filled(rect, egui::CornerRadius::ZERO, BACKDROP);
}

/// Radial falloff approximated by stacked translucent discs.
fn glow(painter: &Painter, center: Pos2, radius: f32, color: Color32, alpha: f32) {
    let step_alpha = alpha / GLOW_RINGS as f32;
    for ring in 0..GLOW_RINGS {
        let fraction = 1.0 - ring as f32 / GLOW_RINGS as f32;
        painter.circle_filled(center, radius * fraction, color.gamma_multiply(step_alpha));
    }
}

pub(crate) fn ambient(painter: &Painter, rect: egui::Rect, poses: &[AmbientPose]) {
    let origin = rect.min;
    for pose in poses {
        let center = to_pos(origin, pose.position);
        let alpha = pose.opacity.clamp(0.0, 1.0);
        if let Some(tint) = pose.name.strip_prefix("glow-") {
            let color = match tint {
                "violet" => VIOLET,
                "teal" => TEAL,
                _ => INDIGO,
            };
            glow(painter, center, rect.width().max(rect.height()) * 0.35, color, alpha);
        } else if pose.name == "badge-glow" {
            let size = egui::vec2(320.0, 72.0) * pose.scale;
            painter.rect_filled(
                egui::Rect::from_center_size(center, size),
                egui::CornerRadius::same(24),
                VIOLET.gamma_multiply(alpha * 0.2),
            );
        } else if pose.name.starts_with("particle") {
            painter.circle_filled(center, 2.0 * pose.scale, TEAL.gamma_multiply(alpha));
        } else if pose.name.starts_with("radar") {
            let radius = if pose.name.ends_with("outer") { 192.0 } else { 128.0 };
            painter.circle_stroke(center, radius, Stroke::new(1.0, VIOLET.gamma_multiply(alpha)));
            let spoke = egui::Vec2::angled(pose.rotation.to_radians()) * radius;
            painter.line_segment(
                [center - spoke, center + spoke],
                Stroke::new(1.0, VIOLET.gamma_multiply((alpha * 2.0).min(1.0))),
            );
        } else if pose.name.starts_with("motion-line") {
            painter.line_segment(
                [center, center + egui::vec2(160.0, 0.0)],
                Stroke::new(1.0, TEAL.gamma_multiply(alpha * 0.5)),
            );
        } else {
            let glyph = if pose.name == "airplane" { "✈" } else { "☁" };
            glyph_at(painter, center, glyph, 40.0, pose.rotation, alpha);
        }
    }
}

pub(crate) fn decorations<'a>(
    painter: &Painter,
    origin: Pos2,
    size: egui::Vec2,
    decorations: impl Iterator<Item = &'a Decoration>,
) {
    for decoration in decorations {
        let anchor = origin + egui::vec2(decoration.anchor.x * size.x, decoration.anchor.y * size.y);
        let center = anchor + egui::vec2(decoration.offset.x, decoration.offset.y);
        painter.circle_filled(center, decoration.radius, decoration.color);
    }
}

pub(crate) fn trail(painter: &Painter, origin: Pos2, frame: &RenderList) {
    for sprite in &frame.trail {
        glyph_at(
            painter,
            to_pos(origin, sprite.position),
            &sprite.variant,
            32.0,
            sprite.rotation,
            sprite.opacity,
        );
    }
}

pub(crate) fn countdown(painter: &Painter, rect: egui::Rect, time_left: TimeLeft) {
    let top = rect.center_top() + egui::vec2(0.0, 24.0);
    painter.text(
        top,
        Align2::CENTER_TOP,
        "LAUNCHING IN",
        FontId::proportional(14.0),
        Color32::from_white_alpha(200),
    );
    let blocks = time_left
        .blocks()
        .iter()
        .map(|(value, label)| format!("{value:02} {label}"))
        .collect::<Vec<_>>()
        .join("   ");
    painter.text(
        top + egui::vec2(0.0, 22.0),
        Align2::CENTER_TOP,
        blocks,
        FontId::proportional(22.0),
        Color32::WHITE,
    );
}

fn glyph_at(painter: &Painter, center: Pos2, glyph: &str, size: f32, degrees: f32, opacity: f32) {
    let color = Color32::WHITE.gamma_multiply(opacity.clamp(0.0, 1.0));
    let galley = painter.layout_no_wrap(glyph.to_owned(), FontId::proportional(size), color);
    let top_left = center - galley.size() / 2.0;
    painter.add(Shape::Text(
        egui::epaint::TextShape::new(top_left, galley, color).with_angle(degrees.to_radians()),
    ));
}
