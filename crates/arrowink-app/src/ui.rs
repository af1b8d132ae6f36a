//! UI components using egui.

use egui::{Align2, Color32, Context, CornerRadius, CursorIcon, Frame, Margin, Pos2, Sense, Stroke, Vec2, vec2};

/// Standard colors used across the overlay.
mod theme {
    use egui::Color32;

    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Accent color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}

const PANEL_RADIUS: u8 = 8;
const BUTTON_RADIUS: u8 = 4;

/// Actions triggered from the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Export the mounted arrow as `arrow.svg`.
    ExportSvg,
    /// Open the keyboard shortcuts modal.
    ShowShortcuts,
}

/// Persistent UI state.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether the keyboard shortcuts modal is open.
    pub shortcuts_modal_open: bool,
    /// Result line shown under the export button.
    pub status: Option<String>,
}

/// Render the overlay and return any triggered action.
///
/// `can_export` is false while no arrow is mounted; the export button is disabled then.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, can_export: bool) -> Option<UiAction> {
    let action = render_export_panel(ctx, ui_state, can_export);
    if ui_state.shortcuts_modal_open {
        render_shortcuts_modal(ctx, ui_state);
    }
    action
}

/// Top-right panel with the export button.
fn render_export_panel(ctx: &Context, ui_state: &UiState, can_export: bool) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("export_panel"))
        .anchor(Align2::RIGHT_TOP, Vec2::new(-12.0, 12.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if text_button(ui, "Export SVG", can_export) {
                            action = Some(UiAction::ExportSvg);
                        }
                        if text_button(ui, "?", true) {
                            action = Some(UiAction::ShowShortcuts);
                        }
                    });
                    if let Some(status) = &ui_state.status {
                        ui.add_space(4.0);
                        ui.label(egui::RichText::new(status).size(10.0).color(theme::TEXT_MUTED));
                    }
                });
            });
        });

    action
}

/// Keyboard shortcuts modal.
fn render_shortcuts_modal(ctx: &Context, ui_state: &mut UiState) {
    use crate::shortcuts::ShortcutRegistry;

    // Backdrop
    egui::Area::new(egui::Id::new("shortcuts_backdrop"))
        .fixed_pos(Pos2::ZERO)
        .order(egui::Order::Background)
        .show(ctx, |ui| {
            let screen_rect = ctx.input(|i| i.content_rect());
            let response = ui.allocate_rect(screen_rect, Sense::click());
            ui.painter().rect_filled(screen_rect, 0.0, Color32::from_black_alpha(80));
            if response.clicked() {
                ui_state.shortcuts_modal_open = false;
            }
        });

    egui::Area::new(egui::Id::new("shortcuts_modal"))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(360.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Keyboard Shortcuts").size(16.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if text_button(ui, "✕", true) {
                            ui_state.shortcuts_modal_open = false;
                        }
                    });
                });
                ui.add_space(12.0);

                for shortcut in ShortcutRegistry::all() {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(shortcut.format())
                                .size(12.0)
                                .family(egui::FontFamily::Monospace)
                                .color(Color32::from_rgb(100, 116, 139)),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(egui::RichText::new(shortcut.description).size(12.0));
                        });
                    });
                    ui.add_space(4.0);
                }
            });
        });
}

/// Common panel frame style.
fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(8))
}

/// Solid text button; greyed out and inert when disabled. Returns true if clicked.
fn text_button(ui: &mut egui::Ui, label: &str, enabled: bool) -> bool {
    let font_id = egui::FontId::proportional(12.0);
    let galley = ui
        .painter()
        .layout_no_wrap(label.to_string(), font_id.clone(), Color32::PLACEHOLDER);
    let size = vec2(galley.size().x + 20.0, 26.0);

    let sense = if enabled { Sense::click() } else { Sense::hover() };
    let (rect, response) = ui.allocate_exact_size(size, sense);

    if ui.is_rect_visible(rect) {
        let (bg_color, text_color) = if !enabled {
            (Color32::from_gray(235), Color32::from_gray(170))
        } else if response.hovered() {
            (theme::ACCENT.gamma_multiply(0.85), Color32::WHITE)
        } else {
            (theme::ACCENT, Color32::WHITE)
        };

        ui.painter()
            .rect_filled(rect, CornerRadius::same(BUTTON_RADIUS), bg_color);
        ui.painter()
            .text(rect.center(), Align2::CENTER_CENTER, label, font_id, text_color);
    }

    let clicked = enabled && response.clicked();
    if enabled {
        response.on_hover_cursor(CursorIcon::PointingHand);
    }
    clicked
}
