//! Live form renderer.
//!
//! Walks the parsed schema and renders one control per field, asking the
//! field registry how each type presents. Validation outcomes come from
//! the session; this component never decides pass/fail itself.

use leptos::prelude::*;
use leptos::web_sys;
use std::sync::Arc;
use wasm_bindgen::JsCast;

use dynaform::{describe_field, ControlKind, FieldDescriptor, FormSchema, FormSession};

use super::export::ExportButtons;

#[component]
pub fn FormPreview(
    session: RwSignal<Option<FormSession>>,
    dark_mode: ReadSignal<bool>,
) -> impl IntoView {
    // Track only the schema identity here. Value edits mutate the session
    // on every keystroke; rebuilding the control tree for those would throw
    // away input focus.
    let schema = Memo::new(move |_| -> Option<Arc<FormSchema>> {
        session.with(|s| s.as_ref().map(|sess| sess.schema_handle()))
    });

    let submitted =
        Signal::derive(move || session.with(|s| s.as_ref().is_some_and(|sess| sess.submitted())));
    let record_json =
        Signal::derive(move || session.with(|s| s.as_ref().and_then(|sess| sess.submission_json())));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        session.update(|s| {
            if let Some(sess) = s.as_mut() {
                sess.submit();
            }
        });
    };

    let on_reset = move |_| {
        session.update(|s| {
            if let Some(sess) = s.as_mut() {
                sess.reset();
            }
        });
    };

    view! {
        {move || {
            let Some(schema) = schema.get() else {
                return ().into_any();
            };

            view! {
                // The engine owns validation; keep the browser's out of it.
                <form class="space-y-4" novalidate=true on:submit=on_submit>
                    <h1 class="text-2xl font-bold">{schema.title.clone()}</h1>
                    <p>{schema.description.clone()}</p>

                    {schema.fields.iter().map(|field| view! {
                        <FieldControl
                            field=field.clone()
                            session=session
                            dark_mode=dark_mode
                        />
                    }).collect_view()}

                    <button
                        type="submit"
                        class="bg-blue-500 text-white px-4 py-2 rounded hover:bg-blue-600 disabled:opacity-50"
                        prop:disabled=move || submitted.get()
                    >
                        "Submit"
                    </button>

                    {move || submitted.get().then(|| view! {
                        <div class="mt-4 space-y-2">
                            <p class="text-green-500 font-medium">"Form submitted successfully!"</p>
                            <ExportButtons record_json=record_json />
                            <button
                                type="button"
                                class="text-sm text-gray-500 underline hover:text-gray-700"
                                on:click=on_reset
                            >
                                "Start over"
                            </button>
                        </div>
                    })}
                </form>
            }.into_any()
        }}
    }
}

/// Renders one field: label, control chosen via the registry, inline error.
#[component]
fn FieldControl(
    field: FieldDescriptor,
    session: RwSignal<Option<FormSession>>,
    dark_mode: ReadSignal<bool>,
) -> impl IntoView {
    let behavior = describe_field(field.field_type);

    let value_id = field.id.clone();
    let current_value = Signal::derive(move || {
        session.with(|s| {
            s.as_ref()
                .and_then(|sess| sess.value(&value_id).map(String::from))
                .unwrap_or_default()
        })
    });

    let error_id = field.id.clone();
    let error = Signal::derive(move || {
        session.with(|s| {
            s.as_ref()
                .and_then(|sess| sess.error(&error_id).map(String::from))
        })
    });

    let submitted =
        Signal::derive(move || session.with(|s| s.as_ref().is_some_and(|sess| sess.submitted())));

    let control_class = Signal::derive(move || {
        if dark_mode.get() {
            "border w-full p-2 rounded bg-gray-800 text-white border-gray-600"
        } else {
            "border w-full p-2 rounded bg-white text-black border-gray-300"
        }
    });

    let placeholder = behavior
        .accepts_placeholder
        .then(|| field.placeholder.clone())
        .flatten()
        .unwrap_or_default();

    let control = match behavior.control {
        ControlKind::SingleLine => {
            let input_id = field.id.clone();
            let on_input = move |ev: web_sys::Event| {
                let target = ev.target().unwrap();
                let input: web_sys::HtmlInputElement = target.dyn_into().unwrap();
                let value = input.value();
                session.update(|s| {
                    if let Some(sess) = s.as_mut() {
                        sess.set_value(&input_id, value.as_str());
                    }
                });
            };

            view! {
                <input
                    type=behavior.input_type
                    class=move || control_class.get()
                    placeholder=placeholder
                    prop:value=move || current_value.get()
                    prop:disabled=move || submitted.get()
                    on:input=on_input
                />
            }
            .into_any()
        }
        ControlKind::MultiLine => {
            let input_id = field.id.clone();
            let on_input = move |ev: web_sys::Event| {
                let target = ev.target().unwrap();
                let textarea: web_sys::HtmlTextAreaElement = target.dyn_into().unwrap();
                let value = textarea.value();
                session.update(|s| {
                    if let Some(sess) = s.as_mut() {
                        sess.set_value(&input_id, value.as_str());
                    }
                });
            };

            view! {
                <textarea
                    class=move || control_class.get()
                    placeholder=placeholder
                    prop:value=move || current_value.get()
                    prop:disabled=move || submitted.get()
                    on:input=on_input
                />
            }
            .into_any()
        }
        ControlKind::Dropdown => {
            let select_id = field.id.clone();
            let on_change = move |ev: web_sys::Event| {
                let target = ev.target().unwrap();
                let select: web_sys::HtmlSelectElement = target.dyn_into().unwrap();
                let value = select.value();
                session.update(|s| {
                    if let Some(sess) = s.as_mut() {
                        sess.set_value(&select_id, value.as_str());
                    }
                });
            };

            view! {
                <select
                    class=move || control_class.get()
                    prop:value=move || current_value.get()
                    prop:disabled=move || submitted.get()
                    on:change=on_change
                >
                    <option value="">"Select an option"</option>
                    {field.options.iter().map(|option| {
                        let value = option.value.clone();
                        view! {
                            <option value=value>{option.label.clone()}</option>
                        }
                    }).collect_view()}
                </select>
            }
            .into_any()
        }
        ControlKind::ButtonGroup => {
            let group = field
                .options
                .iter()
                .map(|option| {
                    let radio_id = field.id.clone();
                    let opt_value = option.value.clone();
                    let dom_id = format!("{}-{}", field.id, option.value);
                    let checked_value = option.value.clone();
                    let on_change = move |_| {
                        session.update(|s| {
                            if let Some(sess) = s.as_mut() {
                                sess.set_value(&radio_id, opt_value.as_str());
                            }
                        });
                    };

                    view! {
                        <div class="flex items-center">
                            <input
                                type="radio"
                                id=dom_id.clone()
                                name=field.id.clone()
                                value=option.value.clone()
                                class="mr-2"
                                prop:checked=move || current_value.get() == checked_value
                                prop:disabled=move || submitted.get()
                                on:change=on_change
                            />
                            <label for=dom_id>{option.label.clone()}</label>
                        </div>
                    }
                })
                .collect_view();

            view! { <div class="space-y-1">{group}</div> }.into_any()
        }
    };

    view! {
        <div class="space-y-2">
            <label class="block font-semibold">
                {field.label.clone()}
                {field.required.then(|| view! {
                    <span class="text-red-500 ml-1">"*"</span>
                })}
            </label>
            {control}
            {move || error.get().map(|message| view! {
                <span class="text-red-500 text-sm">{message}</span>
            })}
        </div>
    }
}
