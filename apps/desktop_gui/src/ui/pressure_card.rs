//! Item view for a single pressure: collapsed header plus the expanded field editor.

use editor_core::{EditorIntent, ItemView};
use eframe::egui;
use shared::{catalog::Schema, domain::FeedbackFactor};

pub fn show(ui: &mut egui::Ui, item: &ItemView<'_>) -> Option<EditorIntent> {
    let mut intent = None;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            let arrow = if item.expanded { "▼" } else { "▶" };
            if ui.button(arrow).on_hover_text("Expand or collapse").clicked() {
                intent = Some(item.toggle_intent());
            }
            ui.label(egui::RichText::new(&item.pressure.name).strong());
            ui.label(egui::RichText::new(item.pressure.id.as_str()).weak().small());

            let usages = item.usages().len();
            if usages > 0 {
                ui.label(egui::RichText::new(format!("used in {usages} place(s)")).weak());
            }
        });

        if !item.expanded {
            return;
        }

        ui.separator();
        let mut draft = item.pressure.clone();

        egui::Grid::new(("pressure_fields", item.handle.index()))
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut draft.name);
                ui.end_row();

                ui.label("Initial value");
                ui.add(egui::DragValue::new(&mut draft.initial_value).speed(0.5));
                ui.end_row();

                ui.label("Decay");
                ui.add(egui::DragValue::new(&mut draft.decay).speed(0.1));
                ui.end_row();
            });

        ui.add_space(6.0);
        feedback_section(
            ui,
            "Positive feedback",
            &mut draft.growth.positive_feedback,
            item.schema,
        );
        feedback_section(
            ui,
            "Negative feedback",
            &mut draft.growth.negative_feedback,
            item.schema,
        );

        let usages = item.usages();
        if !usages.is_empty() {
            ui.add_space(6.0);
            ui.label(egui::RichText::new("Used by").strong());
            for usage in usages {
                ui.label(format!("• {usage}"));
            }
        }

        if &draft != item.pressure {
            intent = Some(item.edit_intent(draft));
        }

        ui.separator();
        if ui.button("Delete").clicked() {
            intent = Some(item.delete_intent());
        }
    });

    intent
}

fn feedback_section(
    ui: &mut egui::Ui,
    title: &str,
    factors: &mut Vec<FeedbackFactor>,
    schema: &Schema,
) {
    ui.label(egui::RichText::new(format!("{title} ({})", factors.len())).strong());
    if factors.is_empty() {
        ui.label(egui::RichText::new("none").weak());
        return;
    }

    let mut remove = None;
    for (index, factor) in factors.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(factor_label(schema, factor));
            if ui.small_button("Remove").clicked() {
                remove = Some(index);
            }
        });
    }
    if let Some(index) = remove {
        factors.remove(index);
    }
}

/// `variable` resolved through the schema, with `weight` when present; raw
/// JSON for factors of any other shape.
pub fn factor_label(schema: &Schema, factor: &FeedbackFactor) -> String {
    let Some(variable) = factor.field("variable").and_then(|v| v.as_str()) else {
        return factor.0.to_string();
    };

    let label = schema.variable_label(variable).unwrap_or(variable);
    match factor.field("weight").and_then(|w| w.as_f64()) {
        Some(weight) => format!("{label} × {weight}"),
        None => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn labels_factors_through_schema_variables() {
        let schema = Schema(json!({"variables": {"food": {"label": "Food supply"}}}));
        let factor = FeedbackFactor(json!({"variable": "food", "weight": 0.5}));
        assert_eq!(factor_label(&schema, &factor), "Food supply × 0.5");
    }

    #[test]
    fn unknown_variables_fall_back_to_their_key() {
        let factor = FeedbackFactor(json!({"variable": "morale"}));
        assert_eq!(factor_label(&Schema::default(), &factor), "morale");
    }

    #[test]
    fn free_form_factors_render_as_json() {
        let factor = FeedbackFactor(json!({"expr": "a > b"}));
        assert_eq!(factor_label(&Schema::default(), &factor), r#"{"expr":"a > b"}"#);
    }
}
