use crate::cli::Args;
use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::menu::{self, Scene};
use crate::gui::theme::{self, ThemeColors};
use circle_menu::{GestureController, GestureOutcome, MenuListener, Point, Size};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub controller: GestureController,
    pub scene: Rc<RefCell<Scene>>,
    pub config: Config,
    pub args: Args,
    pub selection_text: String,
    pub click_text: String,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Resize(i32, i32),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    PointerCancel,
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Current pointer position of a drag, which GTK reports as an offset from its start.
fn drag_point(gesture: &gtk::GestureDrag, dx: f64, dy: f64) -> Option<Point> {
    gesture
        .start_point()
        .map(|(x, y)| Point::new(x + dx, y + dy))
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        GestureController,
        Config,
        Args,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Circle Menu"),
            set_default_width: 480,
            set_default_height: 560,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,
                set_margin_all: 12,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::Resize(width, height));
                    },

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::PointerDown(Point::new(x, y)));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some(point) = drag_point(gesture, dx, dy) {
                                sender.input(AppMsg::PointerMove(point));
                            }
                        },
                        connect_drag_end[sender] => move |gesture, dx, dy| {
                            if let Some(point) = drag_point(gesture, dx, dy) {
                                sender.input(AppMsg::PointerUp(point));
                            }
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(AppMsg::PointerCancel);
                        },
                    }
                },

                gtk::Label {
                    add_css_class: "circle-menu-label",
                    #[watch]
                    set_label: &model.selection_text,
                },

                gtk::Label {
                    add_css_class: "circle-menu-label",
                    #[watch]
                    set_label: &model.click_text,
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (controller, config, args, rx) = init;

        theme::load_css();

        let state = controller.state();
        let mut scene = Scene::new(state.division_count(), state.selected_index());
        scene.image = config.image_for(0).and_then(Scene::load_image);

        let model = AppModel {
            selection_text: format!("select={}", controller.selected_index()),
            click_text: String::from("click=-"),
            controller,
            scene: Rc::new(RefCell::new(scene)),
            config,
            args,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let scene_draw = model.scene.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = menu::draw(cr, &scene_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Resize(width, height) => {
                if self
                    .controller
                    .report_viewport_size(width as f64, height as f64)
                {
                    log::info!("Viewport is {}x{}", width, height);
                    let viewport = Size::new(width as f64, height as f64);
                    self.scene.borrow_mut().set_viewport(viewport);
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::PointerDown(point) => {
                let outcome = self.controller.on_pointer_down(point);
                self.handle(outcome);
            }
            AppMsg::PointerMove(point) => {
                let outcome = self.controller.on_pointer_move(point);
                self.handle(outcome);
            }
            AppMsg::PointerUp(point) => {
                let outcome = self.controller.on_pointer_up(point);
                self.handle(outcome);
            }
            AppMsg::PointerCancel => {
                let outcome = self.controller.on_pointer_cancel();
                self.handle(outcome);
            }
            AppMsg::ConfigReload => self.reload(),
            AppMsg::Quit => relm4::main_application().quit(),
        }
    }
}

impl AppModel {
    fn handle(&mut self, outcome: GestureOutcome) {
        if self.scene.borrow_mut().apply(&outcome) {
            self.drawing_area.queue_draw();
        }
        if let Some(event) = outcome.event {
            event.dispatch(self);
        }
    }

    fn reload(&mut self) {
        let mut new_config = match config::load_config() {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };
        self.args.apply(&mut new_config);

        if let Err(e) = self.controller.apply_settings(&new_config.menu) {
            log::error!("Rejected reloaded config: {}", e);
            return;
        }

        let state = self.controller.state();
        let image = new_config.image_for(0).and_then(Scene::load_image);
        {
            let mut scene = self.scene.borrow_mut();
            scene.reset(state.division_count(), state.selected_index());
            scene.set_image(image);
        }
        self.selection_text = format!("select={}", state.selected_index());
        self.config = new_config;
        self.drawing_area.queue_draw();
        log::info!("Configuration reloaded");
    }
}

impl MenuListener for AppModel {
    fn on_selection_change(&mut self, index: usize) {
        self.selection_text = format!("select={}", index);

        let mut scene = self.scene.borrow_mut();
        scene.selected = index;
        if let Some(path) = self.config.image_for(index) {
            let image = Scene::load_image(path);
            scene.set_image(image);
        }
        self.drawing_area.queue_draw();
    }

    fn on_clicked(&mut self, index: usize) {
        self.click_text = format!("click={}", index);
    }
}
