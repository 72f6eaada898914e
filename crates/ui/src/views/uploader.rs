use std::path::PathBuf;

use dioxus::prelude::*;

/// One path per line; surrounding whitespace and blank lines are ignored.
#[must_use]
pub fn parse_path_list(input: &str) -> Vec<PathBuf> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[component]
pub fn UploaderForm(
    preset_files: Vec<PathBuf>,
    preset_media_url: Option<String>,
    busy: bool,
    on_submit: EventHandler<(Vec<PathBuf>, Option<String>)>,
) -> Element {
    let mut paths = use_signal(|| join_paths(&preset_files));
    let mut media_url = use_signal(|| preset_media_url.clone().unwrap_or_default());
    let process_label = if busy { "Processing..." } else { "Process" };

    rsx! {
        section { class: "uploader",
            h2 { class: "uploader__title", "Upload Documents" }
            label { class: "uploader__label", r#for: "uploader-files",
                "Files (one path per line; pdf, doc, docx, txt)"
            }
            textarea {
                class: "uploader__files",
                id: "uploader-files",
                rows: "4",
                placeholder: "/path/to/notes.pdf",
                value: "{paths}",
                oninput: move |evt| paths.set(evt.value()),
            }
            label { class: "uploader__label", r#for: "uploader-media-url", "YouTube link" }
            input {
                class: "uploader__media-url",
                id: "uploader-media-url",
                r#type: "url",
                placeholder: "https://www.youtube.com/watch?v=...",
                value: "{media_url}",
                oninput: move |evt| media_url.set(evt.value()),
            }
            button {
                class: "btn btn-primary",
                id: "uploader-process",
                r#type: "button",
                disabled: busy,
                onclick: move |_| {
                    let files = parse_path_list(&paths.read());
                    let url = media_url.read().trim().to_string();
                    on_submit.call((files, (!url.is_empty()).then_some(url)));
                },
                "{process_label}"
            }
        }
    }
}
