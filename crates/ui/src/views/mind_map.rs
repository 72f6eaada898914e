use dioxus::prelude::*;
use study_core::model::MindMapArtifact;

use crate::vm::{MindMapNodeVm, build_mind_map_vm, generated_caption};

#[component]
pub fn MindMapView(artifact: MindMapArtifact) -> Element {
    let tree = build_mind_map_vm(artifact.root());
    let caption = generated_caption(artifact.generated_at());

    rsx! {
        section { class: "mind-map",
            h2 { class: "mind-map__title", "Mind Map" }
            p { class: "artifact-caption", "{caption}" }
            if let Some(node) = tree {
                div { class: "mind-map__tree",
                    MindMapBlock { node }
                }
            }
        }
    }
}

// Depth is capped when the view-model is built, so this recursion is bounded.
#[component]
fn MindMapBlock(node: MindMapNodeVm) -> Element {
    rsx! {
        div { class: "mind-map-node",
            div { class: "mind-map-node__label",
                "{node.label}"
                if node.truncated {
                    span { class: "mind-map-node__truncated", title: "Deeper levels hidden", "…" }
                }
            }
            if node.has_children() {
                div { class: "mind-map-node__children",
                    for (index, child) in node.children.iter().enumerate() {
                        MindMapBlock { key: "{index}", node: child.clone() }
                    }
                }
            }
        }
    }
}
