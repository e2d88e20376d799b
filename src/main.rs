mod calc;
mod console;
mod window;

use std::cell::RefCell;
use std::io::{self, BufReader};
use std::process;
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;

use gio::prelude::*;
use log::{error, info};

use self::console::{ConsoleDriver, ConsoleError};
use self::window::{Calculator, WindowHandle};

const APP_ID: &str = "com.ethanmcdonough.operand-calculator";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut driver = ConsoleDriver::new(BufReader::new(io::stdin()), io::stdout());
    let operands = match driver.prompt_operand_pair() {
        Ok(operands) => operands,
        Err(e) => {
            error!("could not read the initial operands: {}", e);
            process::exit(1);
        }
    };

    let (tx, rx) = mpsc::channel();
    let pending = RefCell::new(Some((driver, rx)));

    let application = gtk::Application::new(Some(APP_ID), gio::ApplicationFlags::empty());

    application.connect_startup(move |app| {
        let (mut driver, rx) = match pending.borrow_mut().take() {
            Some(pending) => pending,
            None => return,
        };

        let calculator = Rc::new(Calculator::new(app, operands));
        calculator.show();
        window::listen(calculator, rx);

        let handle = WindowHandle::new(tx.clone());
        thread::spawn(move || match driver.main_loop(&handle) {
            Ok(()) | Err(ConsoleError::WindowClosed) => info!("console loop finished"),
            Err(e) => error!("console loop stopped: {}", e),
        });
    });

    application.connect_activate(|_| ());

    let status = application.run();
    info!("application exited with {:?}", status);
}
