//! [`DisplayDevice`] backed by an SDL2 window.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::{info, warn};

use tracker_ui::geometry::{Rect, Size as UiSize};
use tracker_ui::{Color, DisplayDevice, DisplayError, FrameBuffer, MouseCursor, Orientation, UiString};

/// Side of the busy indicator square, in physical pixels.
const WAIT_INDICATOR_SIZE: u32 = 8;

pub struct SdlDisplay {
    frame: FrameBuffer,
    orientation: Orientation,
    surface: SimulatorDisplay<Rgb888>,
    window: Window,
    shut_down: bool,
}

impl SdlDisplay {
    pub fn new(logical: UiSize, orientation: Orientation, scale: u32) -> Result<Self, DisplayError> {
        if logical.width <= 0 || logical.height <= 0 {
            return Err(DisplayError::InvalidSize {
                width: logical.width,
                height: logical.height,
            });
        }
        let physical = orientation.physical_size(logical);
        let output_settings = OutputSettingsBuilder::new().scale(scale).build();
        Ok(Self {
            frame: FrameBuffer::new(logical),
            orientation,
            surface: SimulatorDisplay::new(physical.into()),
            window: Window::new("Tracker UI Simulator", &output_settings),
            shut_down: false,
        })
    }

    /// Show the physical surface. Must run once before polling events.
    pub fn present(&mut self) {
        self.window.update(&self.surface);
    }

    /// Pending window events; pointer positions are physical.
    pub fn events(&mut self) -> impl Iterator<Item = SimulatorEvent> + '_ {
        self.window.events()
    }
}

impl DisplayDevice for SdlDisplay {
    fn open(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    fn close(&mut self) {}

    fn update(&mut self) -> Result<(), DisplayError> {
        let all = self.frame.bounds();
        self.update_rect(all)
    }

    fn update_rect(&mut self, rect: Rect) -> Result<(), DisplayError> {
        if self.shut_down {
            return Err(DisplayError::ShutDown);
        }
        // The simulator surface is infallible.
        let _ = self.frame.blit(&mut self.surface, rect, self.orientation);
        self.frame.take_dirty();
        Ok(())
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn logical_size(&self) -> UiSize {
        self.frame.logical_size()
    }

    fn set_title(&mut self, title: &UiString) {
        // SDL windows keep the title they were created with.
        info!("Title: {}", title);
    }

    fn set_size(&mut self, size: UiSize) -> Result<(), DisplayError> {
        if size.width <= 0 || size.height <= 0 {
            return Err(DisplayError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }
        warn!(
            "Resizing to {}x{}; the window keeps its initial size",
            size.width, size.height
        );
        self.frame.resize(size);
        self.surface = SimulatorDisplay::new(self.orientation.physical_size(size).into());
        Ok(())
    }

    fn go_full_screen(&mut self, _full_screen: bool) -> bool {
        false
    }

    fn set_mouse_cursor(&mut self, cursor: MouseCursor) {
        info!("Cursor: {:?}", cursor);
    }

    fn signal_wait_state(&mut self, waiting: bool, color: Color) {
        let physical = self.surface.size();
        let indicator = Rectangle::new(
            Point::new(
                physical.width.saturating_sub(WAIT_INDICATOR_SIZE) as i32,
                0,
            ),
            Size::new_equal(WAIT_INDICATOR_SIZE),
        );
        if waiting {
            let _ = indicator
                .into_styled(PrimitiveStyle::with_fill(Rgb888::from(color)))
                .draw(&mut self.surface);
        } else {
            let area = self
                .orientation
                .transform_inverse_rect(indicator.into(), self.frame.logical_size());
            let _ = self.frame.blit(&mut self.surface, area, self.orientation);
        }
        self.present();
    }

    fn shut_down(&mut self) {
        info!("Display shut down");
        self.shut_down = true;
    }
}
