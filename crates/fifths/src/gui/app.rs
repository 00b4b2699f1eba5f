use crate::config;
use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, WheelView};
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use rotary::{Point, WheelEvent, WheelInput};
use std::cell::RefCell;
use std::rc::Rc;
use tokio_util::sync::CancellationToken;

pub struct AppModel {
    pub view: Rc<RefCell<WheelView>>,
    pub visible: bool,
    pub wheel_tx: async_channel::Sender<WheelInput>,
    pub cancel: CancellationToken,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Activate,
    Pointer(WheelInput),
    Resize(i32, i32),
    Wheel(WheelEvent),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Wheel(e) => AppMsg::Wheel(e),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn event_time(controller: &impl IsA<gtk::EventController>) -> u64 {
    controller.current_event_time() as u64
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        WheelView,
        async_channel::Sender<WheelInput>,
        async_channel::Receiver<AppEvent>,
        CancellationToken,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Fifths"),
            #[watch]
            set_visible: model.visible,
            #[watch]
            set_opacity: if model.visible { 1.0 } else { 0.0 },
            add_css_class: "fifths-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => {
                            sender.input(AppMsg::Hide);
                            glib::Propagation::Stop
                        }
                        gtk::gdk::Key::Return | gtk::gdk::Key::KP_Enter => {
                            sender.input(AppMsg::Activate);
                            glib::Propagation::Stop
                        }
                        _ => glib::Propagation::Proceed,
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "fifths-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |gesture, x, y| {
                        sender.input(AppMsg::Pointer(WheelInput::PointerDown {
                            pointer: Point::new(x, y),
                            time_ms: event_time(gesture),
                        }));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::Pointer(WheelInput::PointerMove {
                                pointer: Point::new(x + dx, y + dy),
                                time_ms: event_time(gesture),
                            }));
                        }
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::Pointer(WheelInput::PointerUp));
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::Pointer(WheelInput::PointerCancel));
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (view, wheel_tx, rx, cancel) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let model = AppModel {
            view: Rc::new(RefCell::new(view)),
            visible: false,
            wheel_tx,
            cancel,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let view_draw = model.view.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = wheel::draw(cr, &view_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                self.visible = true;
                self.send(WheelInput::Refresh);
                self.drawing_area.queue_draw();
            }
            AppMsg::Hide => {
                self.visible = false;
                self.send(WheelInput::Halt);
            }
            AppMsg::Activate => {
                if !self.visible {
                    return;
                }
                if let Some(item) = self.view.borrow().selected_item() {
                    log::info!("Selected {} ({})", item.label, item.id);
                    println!("{}", item.id);
                }
                self.visible = false;
                self.send(WheelInput::Halt);
            }
            AppMsg::Pointer(input) => {
                if self.visible {
                    self.send(input);
                }
            }
            AppMsg::Resize(width, height) => {
                let center = self
                    .view
                    .borrow_mut()
                    .resize(width as f64, height as f64);
                let center = (width > 0 && height > 0).then_some(center);
                self.send(WheelInput::Layout(center));
                self.drawing_area.queue_draw();
            }
            AppMsg::Wheel(event) => {
                if self.view.borrow_mut().apply(&event) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let items = new_config.items();
                    {
                        let mut view = self.view.borrow_mut();
                        view.set_items(items.clone());
                        view.set_settings(&new_config.wheel);
                    }
                    self.send(WheelInput::Settings(new_config.wheel));
                    self.send(WheelInput::Items(items));
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.cancel.cancel();
    }
}

impl AppModel {
    fn send(&self, input: WheelInput) {
        if let Err(e) = self.wheel_tx.try_send(input) {
            log::warn!("Wheel input dropped: {}", e);
        }
    }
}
