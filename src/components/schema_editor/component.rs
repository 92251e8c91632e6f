use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use super::config::EditorConfig;
use super::inspector::Inspector;
use super::render;
use super::scene::build_scene;
use super::state::EditorState;
use super::toolbar::Toolbar;
use super::types::Point;

fn canvas_size(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

/// Toolbar, schema canvas and inspector sidebar sharing one [`EditorState`].
#[component]
pub fn SchemaEditor(
	/// Geometry and file settings; defaults when omitted.
	#[prop(optional)]
	config: Option<EditorConfig>,
	/// Take the full window height and follow window resizes.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed canvas width; follows the parent when `None`.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed canvas height; follows the parent when `None`.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = RwSignal::new(EditorState::new(config.unwrap_or_default(), 800.0, 600.0));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = canvas_size(&canvas, width, height);
		state.update(|s| s.resize(w, h));

		if fullscreen && resize_cb.borrow().is_none() {
			let Some(window) = web_sys::window() else {
				return;
			};
			*resize_cb.borrow_mut() = Some(Closure::new(move || {
				let (nw, nh) = canvas_size(&canvas, width, height);
				state.update(|s| s.resize(nw, nh));
			}));
			if let Some(ref cb) = *resize_cb.borrow() {
				if window
					.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
					.is_err()
				{
					warn!("could not listen for window resize");
				}
			}
		}
	});

	// Redraw whenever model or view state changes.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		state.with(|s| {
			let (w, h) = (s.view.width as u32, s.view.height as u32);
			if canvas.width() != w {
				canvas.set_width(w);
			}
			if canvas.height() != h {
				canvas.set_height(h);
			}
			match context_2d(&canvas) {
				Some(ctx) => render::render(&build_scene(s), &ctx),
				None => warn!("canvas has no 2d context"),
			}
		});
	});

	let pointer_at = move |ev: &MouseEvent| -> Option<Point> {
		let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some(Point::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let on_mousedown = move |ev: MouseEvent| {
		let Some(p) = pointer_at(&ev) else {
			return;
		};
		if let Some(canvas) = canvas_ref.get_untracked() {
			let _ = canvas.focus();
		}
		state.update(|s| s.pointer_down(p, ev.shift_key()));
	};

	let on_mousemove = move |ev: MouseEvent| {
		if let Some(p) = pointer_at(&ev) {
			state.maybe_update(|s| s.pointer_move(p));
		}
	};

	let on_mouseup = move |_: MouseEvent| state.update(|s| s.pointer_up());
	let on_mouseleave = move |_: MouseEvent| state.update(|s| s.pointer_up());

	let on_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
		"Escape" => {
			state.maybe_update(|s| s.cancel_connect());
		}
		"Delete" | "Backspace" => {
			ev.prevent_default();
			state.maybe_update(|s| s.delete_selected());
		}
		_ => {}
	};

	let layout = if fullscreen {
		"display: flex; flex-direction: column; height: 100vh;"
	} else {
		"display: flex; flex-direction: column; height: 100%;"
	};

	view! {
		<div class="schema-editor" style=layout>
			<Toolbar state=state />
			<div class="workspace" style="display: flex; flex: 1; min-height: 0;">
				<div
					class="canvas-host"
					style="position: relative; flex: 1; overflow: hidden;"
				>
					<canvas
						node_ref=canvas_ref
						class="schema-canvas"
						tabindex="0"
						on:mousedown=on_mousedown
						on:mousemove=on_mousemove
						on:mouseup=on_mouseup
						on:mouseleave=on_mouseleave
						on:keydown=on_keydown
						style="position: absolute; top: 0; left: 0; display: block; outline: none;"
					/>
				</div>
				<Inspector state=state />
			</div>
		</div>
	}
}
