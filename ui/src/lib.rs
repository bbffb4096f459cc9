use std::sync::Arc;

use leptos::prelude::*;

use dynaform::{parse, FormSchema, FormSession};

mod components;

use components::form_preview::FormPreview;
use components::schema_editor::SchemaEditor;

/// Schema loaded on first mount so the preview pane is not blank.
const STARTER_SCHEMA: &str = r#"{
  "formTitle": "Project Application",
  "formDescription": "Tell us about yourself and your project.",
  "fields": [
    {
      "id": "name",
      "type": "text",
      "label": "Full Name",
      "required": true,
      "placeholder": "Ada Lovelace"
    },
    {
      "id": "email",
      "type": "email",
      "label": "Email Address",
      "required": true,
      "placeholder": "you@example.com",
      "validation": {
        "pattern": "^[^@\\s]+@[^@\\s]+\\.[^@\\s]+$",
        "message": "Please enter a valid email address"
      }
    },
    {
      "id": "experience",
      "type": "select",
      "label": "Years of Experience",
      "required": true,
      "options": [
        { "value": "0-2", "label": "0-2 years" },
        { "value": "3-5", "label": "3-5 years" },
        { "value": "5+", "label": "5+ years" }
      ]
    },
    {
      "id": "remote",
      "type": "radio",
      "label": "Preferred Work Mode",
      "required": true,
      "options": [
        { "value": "remote", "label": "Remote" },
        { "value": "hybrid", "label": "Hybrid" },
        { "value": "onsite", "label": "On-site" }
      ]
    },
    {
      "id": "about",
      "type": "textarea",
      "label": "About the Project",
      "placeholder": "A few sentences"
    }
  ]
}"#;

#[component]
pub fn App() -> impl IntoView {
    let (dark_mode, set_dark_mode) = signal(false);
    let schema_text = RwSignal::new(STARTER_SCHEMA.to_string());

    // Re-parse on every editor change. The rendered message is decided
    // here: syntax errors collapse to a single fixed line, schema errors
    // surface their diagnostic.
    let parsed = Memo::new(move |_| -> Result<Arc<FormSchema>, String> {
        match parse(&schema_text.get()) {
            Ok(schema) => Ok(Arc::new(schema)),
            Err(err) if err.is_syntax() => Err("Invalid JSON. Please correct it.".to_string()),
            Err(err) => Err(format!("Schema error: {}", err)),
        }
    });

    // One session per successfully parsed schema; a re-parse discards the
    // previous session, values included.
    let session = RwSignal::new(Option::<FormSession>::None);
    Effect::new(move || match parsed.get() {
        Ok(schema) => session.set(Some(FormSession::new(schema))),
        Err(_) => session.set(None),
    });

    let shell_class = move || {
        if dark_mode.get() {
            "min-h-screen bg-gray-900 text-white"
        } else {
            "min-h-screen bg-white text-black"
        }
    };

    view! {
        <div class=shell_class>
            <button
                type="button"
                class="absolute top-4 right-4 px-3 py-2 text-sm rounded bg-gray-800 text-white hover:bg-gray-700"
                on:click=move |_| set_dark_mode.update(|d| *d = !*d)
            >
                {move || if dark_mode.get() { "Light Mode" } else { "Dark Mode" }}
            </button>
            <div class="flex flex-col lg:flex-row">
                <div class="w-full lg:w-1/2 p-4 border-r border-gray-300">
                    <SchemaEditor schema_text=schema_text dark_mode=dark_mode />
                </div>
                <div class="w-full lg:w-1/2 p-4">
                    <h2 class="text-xl font-bold mb-4">"Form Preview"</h2>
                    {move || match parsed.get() {
                        Ok(_) => view! {
                            <FormPreview session=session dark_mode=dark_mode />
                        }.into_any(),
                        Err(message) => view! {
                            <p class="text-red-500 text-sm">{message}</p>
                        }.into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}
