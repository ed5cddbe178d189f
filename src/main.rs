//! Ball Toy entry point
//!
//! Handles platform-specific initialization and starts the two loops.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_toy {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use ball_toy::platform::web::{AnimationLoop, DomColorPicker, Interval, Listener, canvas_rect};
    use ball_toy::renderer::{DrawSurface, SdfRenderState};
    use ball_toy::{App, Settings};

    /// State shared by the timer, the frame loop and the pointer handlers
    struct Toy {
        app: App,
        picker: DomColorPicker,
        render_state: SdfRenderState,
    }

    /// A running toy. Dropping it stops both loops, removes every listener
    /// and clears the surface.
    pub struct Mounted {
        toy: Rc<RefCell<Toy>>,
        listeners: Vec<Listener>,
        interval: Option<Interval>,
        animation: Option<AnimationLoop>,
    }

    impl Drop for Mounted {
        fn drop(&mut self) {
            self.listeners.clear();
            self.interval.take();
            self.animation.take();

            if let Ok(mut toy) = self.toy.try_borrow_mut() {
                toy.render_state.clear();
                if let Err(e) = toy.render_state.present() {
                    log::warn!("Failed to clear surface on unmount: {}", e);
                }
            }
            log::info!("Ball Toy unmounted");
        }
    }

    thread_local! {
        static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Ball Toy starting...");

        let settings = Settings::load();
        match mount(settings).await {
            Some(mounted) => {
                MOUNTED.with(|cell| *cell.borrow_mut() = Some(mounted));
                log::info!("Ball Toy running!");
            }
            None => log::warn!("Prerequisites missing, loops not started"),
        }
    }

    pub fn unmount() {
        let mounted = MOUNTED.with(|cell| cell.borrow_mut().take());
        drop(mounted);
    }

    fn pointer_position(event: web_sys::Event) -> Option<Vec2> {
        let event = event.dyn_into::<MouseEvent>().ok()?;
        Some(Vec2::new(event.client_x() as f32, event.client_y() as f32))
    }

    async fn mount(settings: Settings) -> Option<Mounted> {
        let window = web_sys::window()?;
        let document = window.document()?;

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("No #canvas element found");
            return None;
        };

        // Fixed logical size, backing store scaled for the display
        let dpr = window.device_pixel_ratio();
        let width = (settings.canvas_width as f64 * dpr) as u32;
        let height = (settings.canvas_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", settings.canvas_width));
        let _ = style.set_property("height", &format!("{}px", settings.canvas_height));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::warn!("No drawing context: {}", e);
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::warn!("No adapter: {}", e);
                return None;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            SdfRenderState::new(surface, &adapter, width, height, settings.bounds()).await?;

        let parent = canvas.parent_element()?;
        let picker = DomColorPicker::new(&document, &parent, &settings.palette)?;
        let swatches: Vec<_> = picker
            .swatches()
            .map(|(color, el)| (color, el.clone()))
            .collect();

        let tick_ms = settings.tick_interval_ms();
        let toy = Rc::new(RefCell::new(Toy {
            app: App::new(settings),
            picker,
            render_state,
        }));

        let mut listeners = Vec::new();

        // Pointer move - hover impulse
        {
            let toy = toy.clone();
            let canvas_clone = canvas.clone();
            listeners.push(Listener::new(&canvas, "mousemove", move |event| {
                if let Some(page) = pointer_position(event) {
                    let rect = canvas_rect(&canvas_clone);
                    toy.borrow_mut().app.pointer_moved(page, rect);
                }
            })?);
        }

        // Click - select / deselect
        {
            let toy = toy.clone();
            let canvas_clone = canvas.clone();
            listeners.push(Listener::new(&canvas, "click", move |event| {
                if let Some(page) = pointer_position(event) {
                    let rect = canvas_rect(&canvas_clone);
                    let mut toy = toy.borrow_mut();
                    let Toy { app, picker, .. } = &mut *toy;
                    app.clicked(page, rect, picker);
                }
            })?);
        }

        // Swatches - color choice
        for (color, swatch) in swatches {
            let toy = toy.clone();
            listeners.push(Listener::new(&swatch, "click", move |_event| {
                let mut toy = toy.borrow_mut();
                let Toy { app, picker, .. } = &mut *toy;
                app.choose_color(color, picker);
            })?);
        }

        // Simulation at a fixed rate
        let interval = {
            let toy = toy.clone();
            Interval::new(tick_ms, move || toy.borrow_mut().app.tick())?
        };

        // Rendering at the display rate
        let animation = {
            let toy = toy.clone();
            AnimationLoop::start(move |_time| {
                let mut toy = toy.borrow_mut();
                let Toy {
                    app, render_state, ..
                } = &mut *toy;
                if let Err(e) = app.render(render_state) {
                    render_state.handle_error(&e);
                }
            })?
        };

        log::info!("Simulation every {} ms, rendering on animation frames", tick_ms);

        Some(Mounted {
            toy,
            listeners,
            interval: Some(interval),
            animation: Some(animation),
        })
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_toy::run().await;
}

/// Stop the toy and release the canvas
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount() {
    wasm_toy::unmount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ball Toy (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let settings = ball_toy::Settings::load_from(path.as_deref());
    headless::run(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use ball_toy::platform::FixedStep;
    use ball_toy::renderer::{DrawSurface, RenderError};
    use ball_toy::{App, CanvasRect, ColorPicker, FillColor, Settings};

    /// Picker that only logs
    struct LogPicker;

    impl ColorPicker for LogPicker {
        fn show(&mut self, palette: &[FillColor]) {
            log::info!("Color picker shown: {:?}", palette);
        }

        fn hide(&mut self) {
            log::info!("Color picker hidden");
        }
    }

    /// Surface that counts what would have been drawn
    #[derive(Default)]
    struct CountingSurface {
        frames: u32,
        circles: u32,
    }

    impl DrawSurface for CountingSurface {
        fn clear(&mut self) {}

        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: FillColor) {
            self.circles += 1;
        }

        fn present(&mut self) -> Result<(), RenderError> {
            self.frames += 1;
            Ok(())
        }
    }

    /// Scripted session: hover the first body, recolor it, run one second
    pub fn run(settings: Settings) {
        let display_hz = 144.0;
        let mut step = FixedStep::new(settings.tick_dt());
        let mut surface = CountingSurface::default();
        let mut app = App::new(settings);
        let mut picker = LogPicker;
        let rect = CanvasRect::default();

        let Some(target) = app.world.bodies.first().map(|b| b.pos) else {
            log::warn!("No bodies configured, nothing to simulate");
            return;
        };

        app.pointer_moved(target, rect);
        app.clicked(target, rect, &mut picker);
        app.choose_color(FillColor::Blue, &mut picker);

        for _ in 0..display_hz as u32 {
            for _ in 0..step.advance(1.0 / display_hz) {
                app.tick();
            }
            if let Err(e) = app.render(&mut surface) {
                log::warn!("Render error: {}", e);
            }
        }

        log::info!(
            "{} ticks, {} frames, {} circles drawn",
            app.world.time_ticks,
            surface.frames,
            surface.circles
        );
        for body in &app.world.bodies {
            log::info!(
                "{:?}: pos ({:.3}, {:.3}) vel ({:.3}, {:.3}) color {}",
                body.id,
                body.pos.x,
                body.pos.y,
                body.vel.x,
                body.vel.y,
                body.color
            );
        }
    }
}
