//! Raw schema editor pane.
//!
//! Thin wrapper around a textarea bound to the schema text signal. All
//! interpretation of the text happens downstream in the parser; this
//! component never inspects it.

use leptos::prelude::*;
use leptos::web_sys;
use wasm_bindgen::JsCast;

#[component]
pub fn SchemaEditor(schema_text: RwSignal<String>, dark_mode: ReadSignal<bool>) -> impl IntoView {
    let on_input = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let textarea: web_sys::HtmlTextAreaElement = target.dyn_into().unwrap();
        schema_text.set(textarea.value());
    };

    let textarea_class = move || {
        let base = "w-full h-96 p-2 font-mono text-sm border rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500";
        if dark_mode.get() {
            format!("{} bg-gray-800 text-white border-gray-600", base)
        } else {
            format!("{} bg-white text-black border-gray-300", base)
        }
    };

    view! {
        <div>
            <h2 class="text-xl font-bold mb-4">"JSON Editor"</h2>
            <textarea
                class=textarea_class
                placeholder="Enter JSON schema..."
                prop:value=move || schema_text.get()
                on:input=on_input
            />
        </div>
    }
}
