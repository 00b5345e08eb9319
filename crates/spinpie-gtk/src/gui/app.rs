use crate::config;
use crate::events::AppEvent;
use crate::gui::chart::{self, ChartState};
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use spinpie::{ChartAction, Point};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub state: Rc<RefCell<ChartState>>,
    pub config_path: PathBuf,
    pub drawing_area: gtk::DrawingArea,
    /// Set while a frame-clock callback is installed.
    pub ticking: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub enum AppMsg {
    Resize(i32, i32),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Swipe(f64, f64),
    /// Frame clock time in microseconds.
    Frame(i64),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (ChartState, PathBuf, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Spinpie"),
            set_default_width: 420,
            set_default_height: 480,

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "spinpie-chart",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerDown(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::PointerMove(Point::new(x + dx, y + dy)));
                        }
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::PointerUp);
                    }
                },

                add_controller = gtk::GestureSwipe {
                    connect_swipe[sender] => move |_, vx, vy| {
                        sender.input(AppMsg::Swipe(vx, vy));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, config_path, rx) = init;

        theme::load_css();

        let state = Rc::new(RefCell::new(state));

        let model = AppModel {
            state: state.clone(),
            config_path,
            drawing_area: gtk::DrawingArea::default(),
            ticking: Rc::new(Cell::new(false)),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = chart::draw(cr, &state_draw.borrow().chart, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        let _ = model.state.borrow_mut().chart.start_reveal();
        model.ensure_ticking(&sender);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        let action = {
            let mut state = self.state.borrow_mut();
            match msg {
                AppMsg::Resize(width, height) => state.resize(f64::from(width), f64::from(height)),
                AppMsg::PointerDown(p) => state.pointer_down(p),
                AppMsg::PointerMove(p) => state.pointer_move(p),
                AppMsg::PointerUp => state.pointer_up(),
                AppMsg::Swipe(vx, vy) => state.swipe(vx, vy),
                AppMsg::Frame(micros) => {
                    let now = Duration::from_micros(u64::try_from(micros).unwrap_or_default());
                    state.chart.tick(now)
                }
                AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                    Ok(c) => {
                        log::info!("Reloaded {}", self.config_path.display());
                        state.load(&c)
                    }
                    Err(e) => {
                        log::error!("Failed to reload config: {}", e);
                        ChartAction::none()
                    }
                },
            }
        };

        if action.should_redraw {
            self.drawing_area.queue_draw();
        }
        self.ensure_ticking(&sender);
    }
}

impl AppModel {
    /// Installs a frame-clock callback while the chart animates. The callback
    /// removes itself once the chart comes to rest.
    fn ensure_ticking(&self, sender: &ComponentSender<Self>) {
        if self.ticking.get() || !self.state.borrow().wants_frames() {
            return;
        }
        self.ticking.set(true);

        let state = self.state.clone();
        let ticking = self.ticking.clone();
        let sender = sender.clone();
        self.drawing_area.add_tick_callback(move |_, clock| {
            let animating = state.try_borrow().map(|s| s.wants_frames()).unwrap_or(true);
            if !animating {
                ticking.set(false);
                return glib::ControlFlow::Break;
            }
            sender.input(AppMsg::Frame(clock.frame_time()));
            glib::ControlFlow::Continue
        });
    }
}
