//! StickUp Web Platform
//!
//! Binds [`stickup_core::StickUp`] to a browser page: the live DOM is wrapped
//! in [`WebDocument`], window `scroll` events drive the controller and
//! `resize` events trigger a re-measure.
//!
//! From JavaScript:
//!
//! ```js
//! const menu = stickUp(document.querySelector('.navbar-wrapper'), JSON.stringify({
//!   parts: ['home', 'features', 'contact'],
//!   itemSelector: '.menuItem',
//!   itemHover: 'active',
//! }));
//! ```

pub mod document;
pub mod error;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use stickup_core::{Diagnostic, StickUp, StickUpOptions};

pub use document::WebDocument;
pub use error::{Result, WebError};

struct Binding {
    doc: WebDocument,
    controller: StickUp<WebDocument>,
}

type Listener = Closure<dyn FnMut(Event)>;

/// A sticky menu attached to the window's scroll and resize events
///
/// Listeners are removed when this is dropped (or `free`d from JS).
#[wasm_bindgen]
pub struct StickyMenu {
    binding: Rc<RefCell<Binding>>,
    on_scroll: Listener,
    on_resize: Listener,
}

impl StickyMenu {
    /// Create the controller for `menu` and start listening
    pub fn attach(menu: Element, options: &StickUpOptions) -> Result<Self> {
        let mut doc = WebDocument::new()?;
        let controller = StickUp::new(&mut doc, menu, options);
        let window = doc.window().clone();
        let binding = Rc::new(RefCell::new(Binding { doc, controller }));

        let scroll_binding = Rc::clone(&binding);
        let on_scroll = Closure::wrap(Box::new(move |_event: Event| {
            // Re-entrant dispatch would only repeat a tick already in flight
            let Ok(mut guard) = scroll_binding.try_borrow_mut() else {
                return;
            };
            let Binding { doc, controller } = &mut *guard;
            let now = doc.now_ms();
            controller.on_scroll_at(doc, now);
        }) as Box<dyn FnMut(Event)>);

        let resize_binding = Rc::clone(&binding);
        let on_resize = Closure::wrap(Box::new(move |_event: Event| {
            let Ok(mut guard) = resize_binding.try_borrow_mut() else {
                return;
            };
            let Binding { doc, controller } = &mut *guard;
            controller.remeasure(doc);
        }) as Box<dyn FnMut(Event)>);

        register_all(
            &[("scroll", &on_scroll), ("resize", &on_resize)],
            |event, listener| {
                window
                    .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
                    .map_err(WebError::dom)
            },
            |event, listener| remove_listener(&window, event, listener),
        )?;

        tracing::info!("sticky menu attached");
        Ok(Self {
            binding,
            on_scroll,
            on_resize,
        })
    }

    /// Diagnostics reported by the controller so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.binding.borrow().controller.diagnostics().to_vec()
    }
}

#[wasm_bindgen]
impl StickyMenu {
    /// Re-measure menu and section geometry after a layout change
    pub fn remeasure(&self) {
        let mut guard = self.binding.borrow_mut();
        let Binding { doc, controller } = &mut *guard;
        controller.remeasure(doc);
    }

    /// Run one tick at the current scroll offset, ignoring the throttle
    pub fn refresh(&self) {
        let mut guard = self.binding.borrow_mut();
        let Binding { doc, controller } = &mut *guard;
        controller.on_scroll(doc);
    }

    #[wasm_bindgen(js_name = isStuck)]
    pub fn is_stuck(&self) -> bool {
        self.binding.borrow().controller.is_stuck()
    }

    /// Active item index, or `undefined` when highlighting is disabled
    #[wasm_bindgen(js_name = activeIndex)]
    pub fn active_index(&self) -> Option<u32> {
        self.binding
            .borrow()
            .controller
            .active_index()
            .and_then(|index| u32::try_from(index).ok())
    }

    /// Diagnostic messages, one string per entry
    #[wasm_bindgen(js_name = diagnosticMessages)]
    pub fn diagnostic_messages(&self) -> Vec<String> {
        self.binding
            .borrow()
            .controller
            .diagnostics()
            .iter()
            .map(|diagnostic| diagnostic.to_string())
            .collect()
    }
}

impl Drop for StickyMenu {
    fn drop(&mut self) {
        let binding = self.binding.borrow();
        let window = binding.doc.window();
        remove_listener(window, "scroll", &self.on_scroll);
        remove_listener(window, "resize", &self.on_resize);
    }
}

fn remove_listener(window: &web_sys::Window, event: &str, listener: &Listener) {
    if let Err(err) =
        window.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
    {
        tracing::warn!("failed to remove {} listener: {:?}", event, err);
    }
}

/// Register listeners in order
///
/// If one fails, the ones already registered are removed again before the
/// error is returned, so no registered callback outlives its closure.
fn register_all<L, E>(
    listeners: &[(&'static str, &L)],
    mut add: impl FnMut(&'static str, &L) -> std::result::Result<(), E>,
    mut remove: impl FnMut(&'static str, &L),
) -> std::result::Result<(), E> {
    for (index, &(event, listener)) in listeners.iter().enumerate() {
        if let Err(err) = add(event, listener) {
            for &(added, listener) in &listeners[..index] {
                remove(added, listener);
            }
            return Err(err);
        }
    }
    Ok(())
}

/// `stickUp(menu, optionsJson)`: make `menu` sticky
///
/// `options_json` is a camelCase options object (`parts`, `selector`,
/// `itemSelector`, `itemHover`, `topMargin`, ...). Pass `"{}"` for a
/// sticky-only menu.
#[wasm_bindgen(js_name = stickUp)]
pub fn stick_up(menu: Element, options_json: &str) -> std::result::Result<StickyMenu, JsValue> {
    let options = StickUpOptions::from_json(options_json).map_err(WebError::from)?;
    Ok(StickyMenu::attach(menu, &options)?)
}
