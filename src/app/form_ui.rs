use anyhow::Result;

use crate::{api::ApiRequest, screens::Screen};

use super::{options::UiOptions, runtime::App};

/// Interactive terminal front end for a single screen.
pub struct FormUi {
    screen: Box<dyn Screen>,
    options: UiOptions,
}

impl FormUi {
    pub fn new(screen: Box<dyn Screen>) -> Self {
        Self {
            screen,
            options: UiOptions::default(),
        }
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the form until the user quits. Resolves to the request built by
    /// the last successful submit.
    pub fn run(self) -> Result<ApiRequest> {
        let FormUi { screen, options } = self;
        tracing::debug!(screen = screen.id(), "starting form ui");
        let mut app = App::new(screen, options);
        app.run()
    }
}
