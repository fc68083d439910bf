// SPDX-License-Identifier: MPL-2.0
//! Attaching the configured UI tree to its host.

use super::{Capabilities, Message, Root};
use crate::error::{Error, Result};
use iced::{window, Element, Task};
use std::fmt;

pub const WINDOW_DEFAULT_HEIGHT: u32 = 560;
pub const WINDOW_DEFAULT_WIDTH: u32 = 720;
pub const MIN_WINDOW_HEIGHT: u32 = 420;
pub const MIN_WINDOW_WIDTH: u32 = 480;

/// Fixed attachment point for the UI tree, written as an id selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint(String);

impl MountPoint {
    /// Selector of the application's attachment point.
    pub const APP_SELECTOR: &'static str = "#app";

    pub fn app() -> Self {
        Self("app".to_string())
    }

    /// Parses an id selector such as `#app`.
    pub fn parse(selector: &str) -> Result<Self> {
        match selector.trim().strip_prefix('#') {
            Some(id) if !id.is_empty() && !id.contains(char::is_whitespace) => {
                Ok(Self(id.to_string()))
            }
            _ => Err(Error::Mount(format!(
                "'{}' is not an id selector",
                selector
            ))),
        }
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn selector(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for MountPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host that takes ownership of the root and its capabilities.
pub trait Mount {
    type Output;

    fn mount(
        self,
        target: &MountPoint,
        root: Box<dyn Root>,
        capabilities: Capabilities,
    ) -> Result<Self::Output>;
}

/// Mounts the tree in a desktop window and runs the event loop until the
/// window closes.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcedMount;

impl Mount for IcedMount {
    type Output = ();

    fn mount(
        self,
        target: &MountPoint,
        root: Box<dyn Root>,
        capabilities: Capabilities,
    ) -> Result<()> {
        use std::cell::RefCell;

        // iced requires an `Fn` boot function; the shell is handed over once.
        let boot_state = RefCell::new(Some(Shell { root, capabilities }));
        let boot = move || {
            let shell = boot_state
                .borrow_mut()
                .take()
                .expect("Boot function called more than once");
            (shell, Task::none())
        };

        iced::application(boot, Shell::update, Shell::view)
            .title(Shell::title)
            .window(window_settings(target))
            .run()
            .map_err(|e| Error::Mount(e.to_string()))
    }
}

/// Builds the window settings for `target`. On Linux the mount point id
/// doubles as the window's application id.
fn window_settings(target: &MountPoint) -> window::Settings {
    #[cfg_attr(not(target_os = "linux"), allow(unused_mut))]
    let mut settings = window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    };

    #[cfg(target_os = "linux")]
    {
        settings.platform_specific.application_id = target.id().to_string();
    }
    #[cfg(not(target_os = "linux"))]
    let _ = target;

    settings
}

/// iced program state: the root plus the capabilities it is lent.
struct Shell {
    root: Box<dyn Root>,
    capabilities: Capabilities,
}

impl Shell {
    fn title(&self) -> String {
        self.root.title(&self.capabilities)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        self.root.update(&mut self.capabilities, message)
    }

    fn view(&self) -> Element<'_, Message> {
        self.root.view(&self.capabilities)
    }
}
