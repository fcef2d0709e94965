//! Browser host, enabled with the `web` feature.
//!
//! Renders into a live DOM element through `web-sys` and drives playback
//! with `setTimeout`, so the page stays responsive while lines animate.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { Termynal } from 'termynal';
//!
//! await init();
//! const term = new Termynal('#termynal', { typeDelay: 40 }, [
//!     { type: 'input', value: 'pip install spacy' },
//!     { type: 'progress' },
//!     { value: 'Successfully installed spacy' },
//! ]);
//! await term.init();
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use js_sys::{Array, Promise, JSON};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys::{Element, HtmlElement};

use crate::config::{parse_float, Dataset, PartialOptions};
use crate::container::{dataset_key, Container, LineId, Resolve, Size};
use crate::dom::CURSOR_ATTRIBUTE;
use crate::error::{Result, TermynalError};
use crate::line::LineData;
use crate::markup::MarkupElement;
use crate::player::{AbortHandle, Step, Termynal};

fn attributes_of(element: &Element) -> Vec<(String, String)> {
    element
        .get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| {
            let value = element.get_attribute(&name)?;
            Some((name, value))
        })
        .collect()
}

/// A live DOM element.
pub struct WebContainer {
    element: HtmlElement,
    lines: Vec<HtmlElement>,
}

impl WebContainer {
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            lines: Vec::new(),
        }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl Container for WebContainer {
    fn dataset(&self) -> Dataset {
        attributes_of(&self.element)
            .into_iter()
            .filter_map(|(name, value)| {
                let rest = name.strip_prefix("data-")?;
                Some((dataset_key(rest), value))
            })
            .collect()
    }

    fn flagged_elements(&self, attribute: &str) -> Vec<MarkupElement> {
        let Ok(nodes) = self.element.query_selector_all(&format!("[{attribute}]")) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| MarkupElement {
                attributes: attributes_of(&element).into_iter().collect(),
                text: element.text_content().unwrap_or_default(),
            })
            .collect()
    }

    fn computed_size(&self) -> Size {
        let style = web_sys::window()
            .and_then(|window| window.get_computed_style(&self.element).ok().flatten());
        let Some(style) = style else {
            return Size::default();
        };
        let pixels = |property: &str| {
            style
                .get_property_value(property)
                .ok()
                .and_then(|value| parse_float(&value))
                .unwrap_or(0.0)
        };
        Size::new(pixels("width"), pixels("height"))
    }

    fn pin_size(&mut self, width: Option<f64>, min_height: Option<f64>) {
        let style = self.element.style();
        if let Some(width) = width {
            let _ = style.set_property("width", &format!("{width}px"));
        }
        if let Some(min_height) = min_height {
            let _ = style.set_property("min-height", &format!("{min_height}px"));
        }
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        let _ = self.element.set_attribute(name, value);
    }

    fn clear(&mut self) {
        self.element.set_inner_html("");
        self.lines.clear();
    }

    fn append_line(&mut self, class: &str) -> LineId {
        let line = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.create_element("pre").ok())
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());

        match line {
            Some(line) => {
                line.set_class_name(class);
                if let Err(err) = self.element.append_child(&line) {
                    tracing::warn!(error = ?err, "Failed to append line");
                }
                self.lines.push(line);
            }
            None => tracing::warn!("No document to create lines in"),
        }
        LineId(self.lines.len().saturating_sub(1))
    }

    fn set_line_text(&mut self, line: LineId, text: &str) {
        if let Some(element) = self.lines.get(line.0) {
            element.set_text_content(Some(text));
        }
    }

    fn set_line_cursor(&mut self, line: LineId, cursor: Option<&str>) {
        if let Some(element) = self.lines.get(line.0) {
            let _ = match cursor {
                Some(glyph) => element.set_attribute(CURSOR_ATTRIBUTE, glyph),
                None => element.remove_attribute(CURSOR_ATTRIBUTE),
            };
        }
    }
}

/// The page's `document`, as a selector resolver.
pub struct WebDocument(web_sys::Document);

impl WebDocument {
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self)
    }
}

impl Resolve for WebDocument {
    type Container = WebContainer;

    fn query_selector(&self, selector: &str) -> Result<Option<WebContainer>> {
        let element = self
            .0
            .query_selector(selector)
            .map_err(|err| TermynalError::InvalidSelector {
                selector: selector.to_string(),
                message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
            })?;
        Ok(element
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .map(WebContainer::new))
    }
}

/// Resolve after `duration` on the browser's timer.
async fn sleep(duration: Duration) -> std::result::Result<(), JsValue> {
    let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
        });
        if !matches!(scheduled, Some(Ok(_))) {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    JsFuture::from(promise).await.map(|_| ())
}

/// Play to completion on the browser's timer.
///
/// The player is only borrowed between waits, so it can be aborted while
/// a wait is pending.
pub async fn play(player: Rc<RefCell<Termynal<WebContainer>>>) -> std::result::Result<(), JsValue> {
    loop {
        let step = player.borrow_mut().step();
        match step {
            Step::Wait(duration) => sleep(duration).await?,
            Step::Finished => return Ok(()),
        }
    }
}

/// Parse a JS value through JSON; `undefined` and `null` give the default.
fn from_js<T>(value: &JsValue) -> std::result::Result<T, JsError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    let json: String = JSON::stringify(value)
        .map_err(|_| JsError::new("value is not JSON-serialisable"))?
        .into();
    serde_json::from_str(&json).map_err(|err| JsError::new(&err.to_string()))
}

/// JavaScript entry point.
#[wasm_bindgen(js_name = Termynal)]
pub struct WebTermynal {
    player: Rc<RefCell<Termynal<WebContainer>>>,
    abort: AbortHandle,
}

#[wasm_bindgen(js_class = Termynal)]
impl WebTermynal {
    /// Find the container and set up a player. With `autoplay` the
    /// animation starts right away.
    #[wasm_bindgen(constructor)]
    pub fn new(
        selector: &str,
        options: JsValue,
        lines: JsValue,
    ) -> std::result::Result<WebTermynal, JsError> {
        let options: PartialOptions = from_js(&options)?;
        let lines: Vec<LineData> = from_js(&lines)?;
        let document = WebDocument::current().ok_or_else(|| JsError::new("no document"))?;

        let player = Termynal::new(&document, selector, options, lines)
            .map_err(|err| JsError::new(&err.to_string()))?;
        let autoplay = player.is_initialized();
        let abort = player.abort_handle();
        let player = Rc::new(RefCell::new(player));

        if autoplay {
            let player = Rc::clone(&player);
            spawn_local(async move {
                if let Err(err) = play(player).await {
                    tracing::warn!(error = ?err, "Playback failed");
                }
            });
        }
        Ok(Self { player, abort })
    }

    /// Initialise and play. Resolves when the last line has finished.
    pub fn init(&self) -> std::result::Result<Promise, JsError> {
        self.player
            .borrow_mut()
            .init()
            .map_err(|err| JsError::new(&err.to_string()))?;
        let player = Rc::clone(&self.player);
        Ok(future_to_promise(async move {
            play(player).await.map(|_| JsValue::UNDEFINED)
        }))
    }

    /// Stop the animation where it is.
    pub fn abort(&self) {
        self.abort.abort();
    }

    /// Descriptors to be played, as plain objects.
    pub fn lines(&self) -> std::result::Result<Array, JsError> {
        let json = serde_json::to_string(self.player.borrow().lines())
            .map_err(|err| JsError::new(&err.to_string()))?;
        let parsed = JSON::parse(&json).map_err(|_| JsError::new("invalid JSON"))?;
        Ok(parsed.unchecked_into())
    }
}
