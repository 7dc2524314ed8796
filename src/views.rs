use serde_json::{Value, json};

use crate::core::models::Identification;
use crate::upload::UploadController;
use crate::validation::MAX_FILE_SIZE_MB;

pub const ACTION_OPEN_PICKER: &str = "open_picker";
pub const ACTION_RESET: &str = "reset";
pub const ACTION_SUBMIT: &str = "submit";

/// Keys that activate the dropzone like a click does.
#[must_use]
pub fn dropzone_activates(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// Build the view tree for the upload form from the controller's state.
///
/// The tree is a plain JSON description the host maps onto its widgets:
/// - dropzone (preview image, or the empty-state copy)
/// - selection label with "Upload photo" and, when a file is chosen, "Reset"
/// - hidden file input
/// - submit button
/// - error status and result panel, when present
pub fn render_form(controller: &UploadController) -> Value {
    let dropzone_body = match controller.preview_url() {
        Some(url) => json!({
            "type": "preview",
            "image": { "src": url, "alt": "Selected plant preview" }
        }),
        None => json!({
            "type": "empty",
            "pill": "JPG only",
            "title": "Drop or click to add a plant photo",
            "subtitle": format!(
                "Up to {MAX_FILE_SIZE_MB}MB. We will use this photo to identify your plant \
                 and offer care tips."
            )
        }),
    };

    let selection_label = controller
        .selected_file_name()
        .unwrap_or("No photo selected yet");

    let mut dropzone_actions = vec![json!({
        "type": "button",
        "text": "Upload photo",
        "action": ACTION_OPEN_PICKER
    })];
    if controller.has_selection() {
        dropzone_actions.push(json!({
            "type": "button",
            "text": "Reset",
            "action": ACTION_RESET
        }));
    }

    let submit_label = if controller.is_uploading() {
        "Sending photo…"
    } else {
        "Identify my plant"
    };

    let mut blocks = vec![
        json!({
            "type": "dropzone",
            "role": "button",
            "label": "Upload a photo of your plant",
            "action": ACTION_OPEN_PICKER,
            "has_preview": controller.preview_url().is_some(),
            "body": dropzone_body,
            "selection": selection_label,
            "actions": dropzone_actions
        }),
        json!({
            "type": "file_input",
            "accept": "image/jpeg,.jpg,.jpeg",
            "capture": "environment",
            "placeholder": "Upload a photo of your plant"
        }),
        json!({
            "type": "submit",
            "text": submit_label,
            "action": ACTION_SUBMIT,
            "disabled": !controller.has_selection() || controller.is_uploading()
        }),
    ];

    if let Some(message) = controller.error_message() {
        blocks.push(json!({
            "type": "status",
            "level": "error",
            "text": message
        }));
    }

    if let Some(result) = controller.result() {
        blocks.push(render_result(result));
    }

    json!({
        "type": "form",
        "blocks": blocks
    })
}

/// Result panel for an identified plant.
pub fn render_result(result: &Identification) -> Value {
    json!({
        "type": "result",
        "title": result.name,
        "subtitle": { "text": result.scientific_name, "emphasis": true },
        "items": [
            { "label": "Sunlight Preference", "value": result.sunlight_preference },
            { "label": "Watering Frequency", "value": result.watering_label() },
            { "label": "Current Condition", "value": result.current_condition },
            { "label": "Care Notes", "value": result.care_notes, "full_width": true }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_space_activate_dropzone() {
        assert!(dropzone_activates("Enter"));
        assert!(dropzone_activates(" "));
        assert!(!dropzone_activates("Tab"));
        assert!(!dropzone_activates("a"));
    }
}
