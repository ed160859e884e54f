pub mod a11y;
pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod data;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod track;

use carousel::{Carousel, Intent};
use config::{prefers_reduced_motion, CarouselConfig, RESIZE_DEBOUNCE_MS};
use data::{fetch_testimonials, Testimonial};
use gloo_events::EventListener;
use gloo_timers::callback::{Interval, Timeout};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Element, Node};
use yew::prelude::*;

const HOST_SELECTOR: &str = ".testimonials-carousel";

#[derive(PartialEq, Clone)]
enum FetchStatus {
    Idle,
    Loading,
    Error(String),
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: CarouselConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let status = use_state(|| FetchStatus::Loading);
    let testimonials = use_state(|| Rc::new(Vec::<Testimonial>::new()));

    {
        let status = status.clone();
        let testimonials = testimonials.clone();

        use_effect_with_deps(
            move |(source, text_limit): &(String, usize)| {
                status.set(FetchStatus::Loading);

                let source = source.clone();
                let text_limit = *text_limit;
                spawn_local(async move {
                    match fetch_testimonials(&source, text_limit).await {
                        Ok(loaded) => {
                            log::debug!("loaded {} testimonials from {}", loaded.len(), source);
                            testimonials.set(Rc::new(loaded));
                            status.set(FetchStatus::Idle);
                        }
                        Err(err) => {
                            log::warn!("could not load testimonials: {}", err);
                            status.set(FetchStatus::Error(err.to_string()));
                        }
                    }
                });

                || ()
            },
            (props.config.source.clone(), props.config.text_limit),
        );
    }

    match &*status {
        FetchStatus::Loading => html! {
            <p class="carousel-status">{ "Loading testimonials…" }</p>
        },
        FetchStatus::Error(message) => html! { <p class="carousel-status error">{ message }</p> },
        FetchStatus::Idle => html! {
            <TestimonialCarousel
                testimonials={(*testimonials).clone()}
                config={props.config.clone()} />
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct CarouselProps {
    pub testimonials: Rc<Vec<Testimonial>>,
    pub config: CarouselConfig,
}

/// Reducer wrapper so every DOM event becomes one [`Intent`] applied to
/// the engine. `None` when there is nothing to show.
#[derive(PartialEq)]
struct CarouselModel {
    carousel: Option<Carousel>,
}

impl CarouselModel {
    fn new(count: usize, config: &CarouselConfig) -> Self {
        // The viewport is measured after the first render.
        let carousel = match Carousel::new(count, 0.0, config) {
            Ok(carousel) => Some(carousel),
            Err(err) => {
                log::debug!("carousel not started: {}", err);
                None
            }
        };
        Self { carousel }
    }
}

impl Reducible for CarouselModel {
    type Action = Intent;

    fn reduce(self: Rc<Self>, action: Intent) -> Rc<Self> {
        let Some(current) = self.carousel.as_ref() else {
            return self;
        };

        let mut next = current.clone();
        next.apply(action);
        if &next == current {
            return self;
        }

        Rc::new(Self {
            carousel: Some(next),
        })
    }
}

#[function_component(TestimonialCarousel)]
pub fn testimonial_carousel(props: &CarouselProps) -> Html {
    let model = {
        let count = props.testimonials.len();
        let config = props.config.clone();
        use_reducer(move || CarouselModel::new(count, &config))
    };
    let root_ref = use_node_ref();
    let viewport_ref = use_node_ref();
    let track_ref = use_node_ref();
    let active = model.carousel.is_some();

    {
        let dispatcher = model.dispatcher();
        let viewport_ref = viewport_ref.clone();

        use_effect_with_deps(
            move |active: &bool| {
                let mut listener = None;
                let pending = Rc::new(RefCell::new(None::<Timeout>));

                if *active {
                    if let Some(width) = viewport_width(&viewport_ref) {
                        dispatcher.dispatch(Intent::Resize(width));
                    }

                    if let Some(window) = window() {
                        let pending = pending.clone();
                        listener = Some(EventListener::new(&window, "resize", move |_| {
                            let dispatcher = dispatcher.clone();
                            let viewport_ref = viewport_ref.clone();
                            // Replacing the handle cancels the previous timeout.
                            *pending.borrow_mut() = Some(Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                                if let Some(width) = viewport_width(&viewport_ref) {
                                    dispatcher.dispatch(Intent::Resize(width));
                                }
                            }));
                        }));
                    }
                }

                move || {
                    drop(listener);
                    pending.borrow_mut().take();
                }
            },
            active,
        );
    }

    {
        let dispatcher = model.dispatcher();
        let schedule = model
            .carousel
            .as_ref()
            .map(|carousel| carousel.autoplay())
            .filter(|autoplay| autoplay.is_running())
            .map(|autoplay| autoplay.interval_ms());

        use_effect_with_deps(
            move |schedule: &Option<u32>| {
                let interval = schedule.map(|interval_ms| {
                    Interval::new(interval_ms, move || dispatcher.dispatch(Intent::Tick))
                });
                move || drop(interval)
            },
            schedule,
        );
    }

    let Some(carousel) = model.carousel.as_ref() else {
        return html! {};
    };

    let dispatch = |intent: Intent| {
        let dispatcher = model.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(intent))
    };

    let on_keydown = {
        let dispatcher = model.dispatcher();
        Callback::from(move |event: KeyboardEvent| {
            if let Some(intent) = Intent::from_key(&event.key()) {
                event.prevent_default();
                dispatcher.dispatch(intent);
            }
        })
    };

    let on_focus_in = {
        let dispatcher = model.dispatcher();
        Callback::from(move |_: FocusEvent| dispatcher.dispatch(Intent::FocusIn))
    };

    let on_focus_out = {
        let dispatcher = model.dispatcher();
        let root_ref = root_ref.clone();
        Callback::from(move |event: FocusEvent| {
            let next_focus = event
                .related_target()
                .and_then(|target| target.dyn_into::<Node>().ok());
            let stays_inside = match (root_ref.get(), next_focus) {
                (Some(root), Some(next)) => root.contains(Some(&next)),
                _ => false,
            };
            if !stays_inside {
                dispatcher.dispatch(Intent::FocusOut);
            }
        })
    };

    let pointer_down = {
        let dispatcher = model.dispatcher();
        let viewport_ref = viewport_ref.clone();
        Callback::from(move |event: PointerEvent| {
            if let Some(viewport) = viewport_ref.cast::<Element>() {
                let _ = viewport.set_pointer_capture(event.pointer_id());
            }
            dispatcher.dispatch(Intent::DragStart {
                pointer_id: event.pointer_id(),
                x: event.client_x() as f64,
            });
        })
    };

    let pointer_move = {
        let dispatcher = model.dispatcher();
        let dragging = carousel.state().is_dragging;
        Callback::from(move |event: PointerEvent| {
            if dragging {
                event.prevent_default();
                dispatcher.dispatch(Intent::DragTo {
                    pointer_id: event.pointer_id(),
                    x: event.client_x() as f64,
                });
            }
        })
    };

    let pointer_end = {
        let dispatcher = model.dispatcher();
        let viewport_ref = viewport_ref.clone();
        Callback::from(move |event: PointerEvent| {
            if let Some(viewport) = viewport_ref.cast::<Element>() {
                if viewport.has_pointer_capture(event.pointer_id()) {
                    let _ = viewport.release_pointer_capture(event.pointer_id());
                }
            }
            dispatcher.dispatch(Intent::DragRelease {
                pointer_id: event.pointer_id(),
            });
        })
    };

    let on_transition_end = {
        let dispatcher = model.dispatcher();
        let track_ref = track_ref.clone();
        Callback::from(move |event: TransitionEvent| {
            // Transitions inside the cards bubble up here too.
            let from_track = match (track_ref.get(), event.target()) {
                (Some(track), Some(target)) => target
                    .dyn_into::<Node>()
                    .map(|target| track.is_same_node(Some(&target)))
                    .unwrap_or(false),
                _ => false,
            };
            if from_track {
                dispatcher.dispatch(Intent::Settle);
            }
        })
    };

    let state = carousel.state();
    let presentation = carousel.presentation();
    let root_style = format!("--slides-per-view: {};", state.slides_per_view);
    let track_style = format!(
        "transform: translateX({:.3}px);{}",
        presentation.offset_px,
        if presentation.animated {
            ""
        } else {
            " transition: none;"
        }
    );

    let slides = carousel
        .track()
        .slides()
        .iter()
        .zip(carousel.slide_a11y())
        .filter_map(|(slide, a11y)| {
            let testimonial = props.testimonials.get(slide.real_index)?;
            Some(html! {
                <div class={classes!("carousel-slide", slide.is_clone.then_some("is-clone"))}
                    aria-hidden={a11y.aria_hidden()}
                    tabindex={a11y.tab_index()}>
                    <blockquote class="testimonial">
                        <p class="testimonial-text">{ &testimonial.text }</p>
                        <cite class="testimonial-author">{ &testimonial.author }</cite>
                    </blockquote>
                </div>
            })
        });

    let indicators = carousel
        .indicator_a11y()
        .into_iter()
        .enumerate()
        .map(|(ordinal, a11y)| {
            html! {
                <button type="button"
                    role="tab"
                    class={classes!("indicator", a11y.active.then_some("is-active"))}
                    aria-selected={a11y.aria_selected()}
                    aria-label={format!("Show testimonial {}", ordinal + 1)}
                    tabindex={a11y.tab_index()}
                    onclick={dispatch(Intent::GoTo(ordinal))}>
                </button>
            }
        });

    html! {
        <div class="carousel"
            ref={root_ref}
            style={root_style}
            role="region"
            aria-roledescription="carousel"
            aria-label="Testimonials"
            onkeydown={on_keydown}
            onmouseenter={dispatch(Intent::HoverStart)}
            onmouseleave={dispatch(Intent::HoverEnd)}
            onfocusin={on_focus_in}
            onfocusout={on_focus_out}>
            <button type="button" class="carousel-control prev"
                aria-label="Previous testimonial"
                onclick={dispatch(Intent::Prev)}>
                { "‹" }
            </button>
            <div class="carousel-viewport"
                ref={viewport_ref}
                onpointerdown={pointer_down}
                onpointermove={pointer_move}
                onpointerup={pointer_end.clone()}
                onpointercancel={pointer_end}>
                <div class="carousel-track"
                    ref={track_ref}
                    style={track_style}
                    ontransitionend={on_transition_end}>
                    { for slides }
                </div>
            </div>
            <button type="button" class="carousel-control next"
                aria-label="Next testimonial"
                onclick={dispatch(Intent::Next)}>
                { "›" }
            </button>
            <div class="carousel-indicators" role="tablist">
                { for indicators }
            </div>
        </div>
    }
}

fn viewport_width(viewport: &NodeRef) -> Option<f64> {
    viewport
        .cast::<Element>()
        .map(|element| element.get_bounding_client_rect().width())
}

/// Mounts one independent carousel on every host element on the page.
#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let Some(document) = window().and_then(|window| window.document()) else {
        return;
    };
    let hosts = match document.query_selector_all(HOST_SELECTOR) {
        Ok(hosts) => hosts,
        Err(err) => {
            log::warn!("could not query carousel hosts: {:?}", err);
            return;
        }
    };

    let reduced_motion = prefers_reduced_motion();
    for index in 0..hosts.length() {
        let Some(host) = hosts
            .get(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let config = CarouselConfig::from_host(&host).with_reduced_motion(reduced_motion);
        yew::Renderer::<App>::with_root_and_props(host, AppProps { config }).render();
    }
}
