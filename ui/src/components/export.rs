//! Export adapter for the submission record.
//!
//! Receives the finished record as pretty-printed JSON and ships it to the
//! clipboard or a file download. Failures surface as a transient status
//! note; the session that produced the record is never touched, so the
//! user can simply retry.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::web_sys;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;

const DOWNLOAD_FILENAME: &str = "form_submission.json";

#[component]
pub fn ExportButtons(record_json: Signal<Option<String>>) -> impl IntoView {
    let (status, set_status) = signal(Option::<String>::None);

    let flash_status = move |message: String| {
        set_status.set(Some(message));
        spawn_local(async move {
            TimeoutFuture::new(2_000).await;
            set_status.set(None);
        });
    };

    let on_copy = move |_| {
        let Some(json) = record_json.get_untracked() else {
            return;
        };
        let message = match copy_to_clipboard(&json) {
            Ok(()) => "Submission copied to clipboard".to_string(),
            Err(err) => {
                log::warn!("clipboard export failed: {}", err);
                format!("Copy failed: {}", err)
            }
        };
        flash_status(message);
    };

    let on_download = move |_| {
        let Some(json) = record_json.get_untracked() else {
            return;
        };
        match download_json(&json, DOWNLOAD_FILENAME) {
            Ok(()) => {}
            Err(err) => {
                log::warn!("file export failed: {}", err);
                flash_status(format!("Download failed: {}", err));
            }
        }
    };

    view! {
        <div class="flex items-center gap-2">
            <button
                type="button"
                class="bg-gray-500 text-white px-4 py-2 rounded hover:bg-gray-600"
                on:click=on_copy
            >
                "Copy JSON"
            </button>
            <button
                type="button"
                class="bg-green-600 text-white px-4 py-2 rounded hover:bg-green-700"
                on:click=on_download
            >
                "Download JSON"
            </button>
            {move || status.get().map(|message| view! {
                <span class="text-sm text-gray-500">{message}</span>
            })}
        </div>
    }
}

/// Write text to the clipboard via `navigator.clipboard`.
///
/// The payload is embedded as a JSON string literal, which is also a valid
/// JS string literal, so arbitrary record content cannot break out of the
/// expression.
fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let literal = serde_json::to_string(text).map_err(|e| e.to_string())?;
    js_sys::eval(&format!("navigator.clipboard.writeText({})", literal))
        .map(|_| ())
        .map_err(|e| format!("{:?}", e))
}

/// Trigger a browser download of `json` by clicking a synthetic anchor
/// pointing at a Blob object URL.
fn download_json(json: &str, filename: &str) -> Result<(), String> {
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let parts = js_sys::Array::of1(&JsValue::from_str(json));
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| format!("{:?}", e))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("{:?}", e))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document available".to_string())?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "could not create anchor element".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}
