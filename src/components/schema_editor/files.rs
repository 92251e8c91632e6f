use std::cell::RefCell;
use std::rc::Rc;

use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, File, FileReader, HtmlAnchorElement, Url};

use super::io::SchemaError;

/// Offers `contents` to the user as a JSON file download.
pub fn download_json(file_name: &str, contents: &str) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let document = window
		.document()
		.ok_or_else(|| JsValue::from_str("no document"))?;

	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let parts = js_sys::Array::of1(&JsValue::from_str(contents));
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();
	Url::revoke_object_url(&url)
}

/// A callback shared between the reader's load handler and the synchronous
/// error path. Whichever finishes first delivers; later calls are ignored.
struct Completion<F>(Rc<RefCell<Option<F>>>);

impl<F> Clone for Completion<F> {
	fn clone(&self) -> Self {
		Self(Rc::clone(&self.0))
	}
}

impl<F: FnOnce(Result<String, SchemaError>)> Completion<F> {
	fn new(on_done: F) -> Self {
		Self(Rc::new(RefCell::new(Some(on_done))))
	}

	fn finish(&self, result: Result<String, SchemaError>) {
		let on_done = self.0.borrow_mut().take();
		if let Some(on_done) = on_done {
			on_done(result);
		}
	}
}

/// Reads `file` as text and hands the result to `on_done` exactly once.
pub fn read_text(file: &File, on_done: impl FnOnce(Result<String, SchemaError>) + 'static) {
	let done = Completion::new(on_done);
	let reader = match FileReader::new() {
		Ok(reader) => reader,
		Err(err) => {
			error!("FileReader unavailable: {err:?}");
			done.finish(Err(SchemaError::Read("file reading is not supported".into())));
			return;
		}
	};

	let loaded = reader.clone();
	let on_load = done.clone();
	let onloadend = Closure::once_into_js(move || {
		let text = loaded
			.result()
			.ok()
			.and_then(|value| value.as_string())
			.ok_or_else(|| SchemaError::Read(file_error_message(&loaded)));
		on_load.finish(text);
	});
	reader.set_onloadend(Some(onloadend.unchecked_ref()));

	if let Err(err) = reader.read_as_text(file) {
		warn!("read_as_text failed: {err:?}");
		reader.set_onloadend(None);
		done.finish(Err(SchemaError::Read("the file could not be opened".into())));
	}
}

fn file_error_message(reader: &FileReader) -> String {
	reader
		.error()
		.map(|e| e.message())
		.unwrap_or_else(|| "file contents are not text".into())
}

/// Blocking notice.
pub fn notify(message: &str) {
	match web_sys::window() {
		Some(window) => {
			if window.alert_with_message(message).is_err() {
				error!("{message}");
			}
		}
		None => error!("{message}"),
	}
}
