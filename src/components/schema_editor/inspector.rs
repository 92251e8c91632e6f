use leptos::prelude::*;
use web_sys::{Event, MouseEvent};

use super::model::{SchemaModel, Selection};
use super::state::EditorState;
use super::types::{Property, PropertyType};

// Rebuilt only when the selected element or its property count changes, so
// text inputs keep focus while typing.
#[derive(Clone, Debug, PartialEq)]
enum Panel {
	Help,
	Element { element: Selection, rows: usize },
}

fn element_label(model: &SchemaModel, element: &Selection) -> Option<String> {
	match element {
		Selection::Node(id) => model.node(id).map(|n| n.label.clone()),
		Selection::Edge(id) => model.edge(id).map(|e| e.label.clone()),
		Selection::None => None,
	}
}

fn element_properties<'a>(model: &'a SchemaModel, element: &Selection) -> Option<&'a [Property]> {
	match element {
		Selection::Node(id) => model.node(id).map(|n| n.properties.as_slice()),
		Selection::Edge(id) => model.edge(id).map(|e| e.properties.as_slice()),
		Selection::None => None,
	}
}

fn set_label(model: &mut SchemaModel, element: &Selection, label: String) {
	match element {
		Selection::Node(id) => model.set_node_label(id, label),
		Selection::Edge(id) => model.set_edge_label(id, label),
		Selection::None => false,
	};
}

fn add_property(model: &mut SchemaModel, element: &Selection) {
	match element {
		Selection::Node(id) => model.add_node_property(id),
		Selection::Edge(id) => model.add_edge_property(id),
		Selection::None => None,
	};
}

fn update_property(
	model: &mut SchemaModel,
	element: &Selection,
	index: usize,
	edit: impl FnOnce(&mut Property),
) {
	let Some(mut property) = element_properties(model, element).and_then(|p| p.get(index).cloned())
	else {
		return;
	};
	edit(&mut property);
	match element {
		Selection::Node(id) => model.update_node_property(id, index, property),
		Selection::Edge(id) => model.update_edge_property(id, index, property),
		Selection::None => false,
	};
}

fn remove_property(model: &mut SchemaModel, element: &Selection, index: usize) {
	match element {
		Selection::Node(id) => model.remove_node_property(id, index),
		Selection::Edge(id) => model.remove_edge_property(id, index),
		Selection::None => false,
	};
}

/// Sidebar editing whichever node or edge is selected.
#[component]
pub fn Inspector(state: RwSignal<EditorState>) -> impl IntoView {
	let panel = Memo::new(move |_| {
		state.with(|s| {
			let element = s.model.selection().clone();
			match element_properties(&s.model, &element) {
				Some(props) => Panel::Element {
					rows: props.len(),
					element,
				},
				None => Panel::Help,
			}
		})
	});

	view! {
		<div class="sidebar" style="width: 300px; overflow-y: auto; padding: 1rem;">
			{move || match panel.get() {
				Panel::Help => view! { <HelpPanel /> }.into_any(),
				Panel::Element { element, rows } => {
					view! { <ElementPanel state=state element=element rows=rows /> }.into_any()
				}
			}}
		</div>
	}
}

#[component]
fn ElementPanel(state: RwSignal<EditorState>, element: Selection, rows: usize) -> impl IntoView {
	let title = match element {
		Selection::Edge(_) => "Edge Properties",
		_ => "Node Properties",
	};

	let label = {
		let element = element.clone();
		move || state.with(|s| element_label(&s.model, &element).unwrap_or_default())
	};
	let on_label = {
		let element = element.clone();
		move |ev: Event| {
			let value = event_target_value(&ev);
			state.update(|s| set_label(&mut s.model, &element, value));
		}
	};
	let on_add = {
		let element = element.clone();
		move |_: MouseEvent| state.update(|s| add_property(&mut s.model, &element))
	};
	let on_delete = move |_: MouseEvent| {
		state.update(|s| {
			s.delete_selected();
		});
	};

	let property_rows = (0..rows)
		.map(|index| view! { <PropertyRow state=state element=element.clone() index=index /> })
		.collect_view();

	view! {
		<div class="panel">
			<div class="panel-header" style="display: flex; justify-content: space-between;">
				<h3>{title}</h3>
				<button class="delete-btn" on:click=on_delete>"Delete"</button>
			</div>
			<div class="field">
				<label>"Label"</label>
				<input type="text" prop:value=label on:input=on_label />
			</div>
			<div class="field">
				<label>"Properties"</label>
				{property_rows}
				<button class="add-btn" on:click=on_add>"+ Add Property"</button>
			</div>
		</div>
	}
}

#[component]
fn PropertyRow(state: RwSignal<EditorState>, element: Selection, index: usize) -> impl IntoView {
	let current = {
		let element = element.clone();
		move || {
			state.with(|s| {
				element_properties(&s.model, &element)
					.and_then(|p| p.get(index).cloned())
					.unwrap_or_default()
			})
		}
	};

	let key = {
		let current = current.clone();
		move || current().key
	};
	let on_key = {
		let element = element.clone();
		move |ev: Event| {
			let key = event_target_value(&ev);
			state.update(|s| update_property(&mut s.model, &element, index, |p| p.key = key));
		}
	};
	let on_type = {
		let element = element.clone();
		move |ev: Event| {
			let Some(ty) = PropertyType::parse(&event_target_value(&ev)) else {
				return;
			};
			state.update(|s| update_property(&mut s.model, &element, index, |p| p.ty = ty));
		}
	};
	let on_remove = move |_: MouseEvent| {
		state.update(|s| remove_property(&mut s.model, &element, index));
	};

	let options = PropertyType::ALL
		.into_iter()
		.map(|ty| {
			let current = current.clone();
			view! {
				<option value=ty.as_str() prop:selected=move || current().ty == ty>
					{ty.as_str()}
				</option>
			}
		})
		.collect_view();

	view! {
		<div class="property-row" style="display: flex; gap: 0.25rem;">
			<input type="text" placeholder="key" prop:value=key on:input=on_key />
			<select on:change=on_type>{options}</select>
			<button class="remove-btn" on:click=on_remove>"×"</button>
		</div>
	}
}

#[component]
fn HelpPanel() -> impl IntoView {
	view! {
		<div class="panel">
			<h3>"Graph Database Designer"</h3>
			<p>"Create nodes and relationships to design your graph database schema."</p>
			<ul class="instructions">
				<li>"Click \"Add Node\" to create a node"</li>
				<li>"Drag nodes to reposition them"</li>
				<li>"Shift+Click on two nodes to connect them"</li>
				<li>"Click nodes/edges to edit properties"</li>
				<li>"Export/Import JSON schema"</li>
				<li>"Esc cancels a connection, Delete removes the selection"</li>
			</ul>
		</div>
	}
}
