use leptos::prelude::*;
use log::{error, warn};
use web_sys::{Event, HtmlInputElement, MouseEvent};

use super::files;
use super::state::EditorState;

#[component]
pub fn Toolbar(state: RwSignal<EditorState>) -> impl IntoView {
	let on_add = move |_: MouseEvent| {
		state.update(|s| {
			s.add_node();
		});
	};

	let on_export = move |_: MouseEvent| {
		let exported = state.with_untracked(|s| {
			s.export()
				.map(|json| (s.config.export_file_name.clone(), json))
		});
		match exported {
			Ok((file_name, json)) => {
				if let Err(err) = files::download_json(&file_name, &json) {
					error!("export download failed: {err:?}");
				}
			}
			Err(err) => {
				error!("{err}");
				files::notify(&err.to_string());
			}
		}
	};

	let on_import = move |ev: Event| {
		let input = event_target::<HtmlInputElement>(&ev);
		let Some(file) = input.files().and_then(|list| list.get(0)) else {
			return;
		};
		files::read_text(&file, move |text| {
			let mut outcome = Ok(());
			match text {
				Ok(text) => state.maybe_update(|s| {
					outcome = s.import(&text);
					outcome.is_ok()
				}),
				Err(err) => outcome = Err(err),
			}
			if let Err(err) = outcome {
				warn!("import failed: {err}");
				files::notify(&err.to_string());
			}
		});
		// Allow picking the same file again.
		input.set_value("");
	};

	let summary = move || {
		state.with(|s| {
			format!(
				"{} nodes · {} edges",
				s.model.nodes().len(),
				s.model.edges().len()
			)
		})
	};

	view! {
		<div
			class="toolbar"
			style="display: flex; align-items: center; gap: 1rem; padding: 0.5rem 1rem;"
		>
			<h1 style="font-size: 1.1rem; margin: 0;">"Graph Database Designer"</h1>
			<div class="buttons" style="display: flex; gap: 0.5rem;">
				<button on:click=on_add>"+ Add Node"</button>
				<button on:click=on_export>"Export Schema"</button>
				<label class="file-button">
					"Import Schema"
					<input type="file" accept=".json" on:change=on_import style="display: none;" />
				</label>
			</div>
			<div class="hint">
				"Shift+Click to connect nodes | Drag to move | Drag canvas to pan"
			</div>
			<div class="summary">{summary}</div>
		</div>
	}
}
