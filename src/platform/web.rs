//! Browser host
//!
//! Expects the page to provide:
//! - `<svg id="main">` containing `<g id="background">` and `<g id="foreground">`
//! - `<audio id="whack">` with the impact clip loaded
//! - rough.js exposed as `window.rough`

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, AudioContextState, Element, HtmlAudioElement, StereoPannerNode, SvgsvgElement};

use crate::Point2;
use crate::animator::Animator;
use crate::audio::{AudioPlayback, CueParams};
use crate::error::Error;
use crate::renderer::{DrawHandle, DrawingSurface, Layer, Style};
use crate::settings::Settings;

// rough.js bindings. Options cross the boundary as JSON.
#[wasm_bindgen(inline_js = "
    export function rough_polygon(svg, points, options) {
        return window.rough.svg(svg).polygon(JSON.parse(points), JSON.parse(options));
    }

    export function rough_circle(svg, x, y, diameter, options) {
        return window.rough.svg(svg).circle(x, y, diameter, JSON.parse(options));
    }
")]
extern "C" {
    fn rough_polygon(svg: &SvgsvgElement, points: &str, options: &str) -> Element;
    fn rough_circle(svg: &SvgsvgElement, x: f64, y: f64, diameter: f64, options: &str) -> Element;
}

/// How long the CSS `fade` class takes before the element is dropped (ms)
const FADE_MS: i32 = 500;

fn js_error(err: JsValue) -> Error {
    Error::Playback(format!("{:?}", err))
}

/// Sketchy drawings on an `<svg>` via rough.js
pub struct RoughSvgSurface {
    svg: SvgsvgElement,
    background: Element,
    foreground: Element,
    drawings: HashMap<u64, Element>,
    next_id: u64,
}

impl RoughSvgSurface {
    pub fn new(svg: SvgsvgElement, background: Element, foreground: Element) -> Self {
        Self {
            svg,
            background,
            foreground,
            drawings: HashMap::new(),
            next_id: 0,
        }
    }

    fn attach(&mut self, layer: Layer, element: Element) -> DrawHandle {
        let group = match layer {
            Layer::Background => &self.background,
            Layer::Foreground => &self.foreground,
        };
        if let Err(e) = group.append_child(&element) {
            log::warn!("Failed to attach drawing: {:?}", e);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.drawings.insert(id, element);
        DrawHandle(id)
    }
}

fn options_json(style: &Style) -> String {
    serde_json::to_string(style).unwrap_or_else(|_| "{}".to_owned())
}

impl DrawingSurface for RoughSvgSurface {
    fn draw_polygon(&mut self, layer: Layer, points: &[Point2], style: &Style) -> DrawHandle {
        let points: Vec<[f64; 2]> = points.iter().map(|p| p.to_array()).collect();
        let points = serde_json::to_string(&points).unwrap_or_else(|_| "[]".to_owned());
        let element = rough_polygon(&self.svg, &points, &options_json(style));
        self.attach(layer, element)
    }

    fn draw_circle(
        &mut self,
        layer: Layer,
        center: Point2,
        diameter: f64,
        style: &Style,
    ) -> DrawHandle {
        let element = rough_circle(&self.svg, center.x, center.y, diameter, &options_json(style));
        self.attach(layer, element)
    }

    fn remove(&mut self, handle: DrawHandle) {
        if let Some(element) = self.drawings.remove(&handle.0) {
            element.remove();
        }
    }

    fn fade(&mut self, handle: DrawHandle) {
        let Some(element) = self.drawings.remove(&handle.0) else {
            return;
        };
        let Some(window) = web_sys::window() else {
            element.remove();
            return;
        };
        let _ = element.class_list().add_1("fade");
        let closure = Closure::once(move || element.remove());
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            FADE_MS,
        );
        closure.forget();
    }
}

/// The impact clip on an `<audio>` element, routed through a stereo panner
pub struct WebAudioPlayback {
    element: HtmlAudioElement,
    ctx: Option<AudioContext>,
    panner: Option<StereoPannerNode>,
}

impl WebAudioPlayback {
    pub fn new(element: HtmlAudioElement) -> Self {
        let routed = AudioContext::new().and_then(|ctx| {
            let source = ctx.create_media_element_source(&element)?;
            let panner = ctx.create_stereo_panner()?;
            source.connect_with_audio_node(&panner)?;
            panner.connect_with_audio_node(&ctx.destination())?;
            Ok((ctx, panner))
        });
        match routed {
            Ok((ctx, panner)) => Self {
                element,
                ctx: Some(ctx),
                panner: Some(panner),
            },
            Err(e) => {
                log::warn!("Stereo panning unavailable: {:?}", e);
                Self {
                    element,
                    ctx: None,
                    panner: None,
                }
            }
        }
    }
}

impl AudioPlayback for WebAudioPlayback {
    fn play(&mut self, params: CueParams) -> Result<(), Error> {
        // Browsers keep the context suspended until a user gesture
        if let Some(ctx) = &self.ctx {
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }

        self.element.pause().map_err(js_error)?;
        self.element.set_current_time(0.0);
        self.element.set_volume(params.volume);
        if let Some(panner) = &self.panner {
            panner.pan().set_value(params.balance as f32);
        }

        // Rejected when the next bounce pauses this one; harmless
        let promise = self.element.play().map_err(js_error)?;
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("Unable to play impact sound: {:?}", e);
            }
        });
        Ok(())
    }
}

type WebAnimator = Animator<RoughSvgSurface, WebAudioPlayback>;

fn element_by_id<T: JsCast>(id: &'static str) -> Result<T, Error> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<T>().ok())
        .ok_or(Error::MissingElement(id))
}

/// Wire the page up and start the frame loop. Runs until the page goes away.
pub fn run() -> Result<(), Error> {
    let mut settings = Settings::load();
    if settings.seed.is_none() {
        settings.seed = Some(js_sys::Date::now() as u64);
    }

    let surface = RoughSvgSurface::new(
        element_by_id("main")?,
        element_by_id(Layer::Background.element_id())?,
        element_by_id(Layer::Foreground.element_id())?,
    );
    let audio = WebAudioPlayback::new(element_by_id("whack")?);
    let animator = Animator::new(&settings, surface, audio)?;

    request_animation_frame(Rc::new(RefCell::new(animator)));
    log::info!("Bounce Box running!");
    Ok(())
}

fn request_animation_frame(animator: Rc<RefCell<WebAnimator>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        animator.borrow_mut().frame(time);
        request_animation_frame(animator);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}
