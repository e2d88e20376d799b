use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::Duration;

use gtk::glib;
use gtk::prelude::*;
use gtk::{Button, Label};
use log::{debug, info, warn};

use crate::calc::{CalcError, Display, OperandPair, Operator};
use crate::console::ConsoleError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn apply_css<T: WidgetExt>(win: &T, bytes: &[u8]) -> Option<Result<(), glib::Error>> {
    win.screen().map(|screen| {
        let provider = gtk::CssProvider::new();
        provider.load_from_data(bytes).map(|_| {
            let priority = gtk::STYLE_PROVIDER_PRIORITY_USER;
            gtk::StyleContext::add_provider_for_screen(&screen, &provider, priority);
        })
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetOperands(OperandPair),
    Dispose,
}

#[derive(Clone)]
pub struct WindowHandle {
    tx: Sender<Command>,
}

impl WindowHandle {
    pub fn new(tx: Sender<Command>) -> Self {
        Self { tx }
    }

    pub fn set_operands(&self, operands: OperandPair) -> Result<(), ConsoleError> {
        self.tx
            .send(Command::SetOperands(operands))
            .map_err(|_| ConsoleError::WindowClosed)
    }

    pub fn dispose(&self) {
        if self.tx.send(Command::Dispose).is_err() {
            debug!("dispose requested after the window was closed");
        }
    }
}

struct CalcButton {
    button: Button,
    op: Operator,
}

impl CalcButton {
    fn new(op: Operator) -> Self {
        let button = Button::with_label(&op.symbol().to_string());
        button.style_context().add_class("calc-button");
        Self { button, op }
    }

    fn schedule_event(&self, state: Rc<RefCell<CalculatorState>>) {
        let op = self.op;
        self.button.connect_clicked(move |_| {
            if let Ok(mut st) = state.try_borrow_mut() {
                st.press(op);
            }
        });
    }
}

pub struct CalculatorState {
    display: Display,
    operation_label: Label,
    result_label: Label,
}

impl CalculatorState {
    fn new(operands: OperandPair) -> Self {
        let display = Display::new(operands);

        let operation_label = Label::new(Some(display.operation_text()));
        operation_label.style_context().add_class("operation-label");

        let result_label = Label::new(Some(display.result_text()));
        result_label.style_context().add_class("result-label");

        Self {
            display,
            operation_label,
            result_label,
        }
    }

    fn refresh(&self) {
        self.operation_label.set_text(self.display.operation_text());
        self.result_label.set_text(self.display.result_text());
    }

    fn press(&mut self, op: Operator) {
        debug!(
            "operator {} pressed on {:?}",
            op.symbol(),
            self.display.operands()
        );
        match self.display.press(op) {
            Ok(value) => debug!("result {}", value),
            Err(CalcError::DivisionByZero) => warn!("division by zero rejected"),
        }
        self.refresh();
    }

    fn set_operands(&mut self, operands: OperandPair) {
        info!("operands set to {} and {}", operands.first, operands.second);
        self.display.set_operands(operands);
        self.refresh();
    }
}

pub struct Calculator {
    window: gtk::ApplicationWindow,
    state: Rc<RefCell<CalculatorState>>,
}

impl Calculator {
    pub fn new(application: &gtk::Application, operands: OperandPair) -> Self {
        let window = gtk::ApplicationWindow::new(application);

        let header = gtk::HeaderBar::new();
        header.set_title(Some("Calculator"));
        header.set_show_close_button(true);
        header.set_decoration_layout(Some("menu:close"));
        window.set_titlebar(Some(&header));

        window.set_title("Calculator");
        window.set_border_width(10);
        window.set_position(gtk::WindowPosition::Center);
        window.set_default_size(350, 250);

        match apply_css(&window, include_bytes!("../css/main.css")) {
            Some(Ok(())) => (),
            Some(Err(e)) => warn!("could not load CSS: {}", e),
            None => warn!("window has no screen, skipping CSS"),
        }

        window.connect_delete_event(|_, _| {
            info!("window closed from its close control");
            glib::Propagation::Proceed
        });

        window.set_resizable(false);

        let state = CalculatorState::new(operands);
        let buttons: Vec<CalcButton> = Operator::ALL
            .iter()
            .map(|op| CalcButton::new(*op))
            .collect();

        let layout = gtk::Box::new(gtk::Orientation::Vertical, 10);
        layout.pack_start(&state.operation_label, false, false, 0);
        layout.pack_start(&state.result_label, false, false, 0);

        let grid = gtk::Grid::new();
        grid.set_row_homogeneous(true);
        grid.set_column_homogeneous(true);
        grid.set_column_spacing(10);

        for (ind, button) in buttons.iter().enumerate() {
            grid.attach(&button.button, ind as i32, 0, 1, 1);
        }

        layout.pack_start(&grid, true, true, 0);
        window.add(&layout);

        let calc = Self {
            window,
            state: Rc::new(RefCell::new(state)),
        };

        let keypress_state = calc.state.clone();
        calc.window.connect_key_press_event(move |_, event| {
            if let Some(op) = event.keyval().to_unicode().and_then(Operator::from_char) {
                if let Ok(mut state) = keypress_state.try_borrow_mut() {
                    state.press(op);
                    return glib::Propagation::Stop;
                }
            }
            glib::Propagation::Proceed
        });

        for button in buttons.iter() {
            button.schedule_event(calc.state.clone());
        }

        calc
    }

    pub fn show(&self) {
        self.window.show_all();
    }

    pub fn set_operands(&self, operands: OperandPair) {
        match self.state.try_borrow_mut() {
            Ok(mut state) => state.set_operands(operands),
            Err(e) => warn!(
                "dropped operands {} and {}: {}",
                operands.first, operands.second, e
            ),
        }
    }

    pub fn dispose(&self) {
        info!("disposing calculator window");
        self.window.close();
    }
}

pub fn listen(calc: Rc<Calculator>, rx: Receiver<Command>) {
    glib::timeout_add_local(POLL_INTERVAL, move || loop {
        match rx.try_recv() {
            Ok(Command::SetOperands(operands)) => calc.set_operands(operands),
            Ok(Command::Dispose) => {
                calc.dispose();
                return glib::ControlFlow::Break;
            }
            Err(TryRecvError::Empty) => return glib::ControlFlow::Continue,
            Err(TryRecvError::Disconnected) => return glib::ControlFlow::Break,
        }
    });
}
