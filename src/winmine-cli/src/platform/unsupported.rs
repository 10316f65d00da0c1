//! Stand-ins for platforms without Win32
//!
//! Every type here is uninhabited, so nothing past `Window::find` can run.

use std::sync::mpsc::Receiver;
use winmine::{Canvas, Error, InputInjector, MouseButton, Point, Rect, Result, Rgb};

fn unsupported() -> Error {
    Error::Unsupported("the game window can only be reached through Win32".to_string())
}

#[derive(Debug, Clone)]
pub enum Window {}

impl Window {
    pub fn find(_title: &str) -> Result<Option<Window>> {
        Err(unsupported())
    }

    pub fn origin(&self) -> Result<Point> {
        match *self {}
    }

    pub fn canvas(&self) -> Result<NullCanvas> {
        match *self {}
    }

    pub fn input(&self) -> NullInput {
        match *self {}
    }
}

pub enum NullCanvas {}

impl Canvas for NullCanvas {
    fn refresh(&mut self) -> Result<()> {
        match *self {}
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Rgb) -> Result<()> {
        match *self {}
    }
}

pub enum NullInput {}

impl InputInjector for NullInput {
    fn button_down(&mut self, _at: Point, _button: MouseButton) -> Result<()> {
        match *self {}
    }

    fn button_up(&mut self, _at: Point, _button: MouseButton) -> Result<()> {
        match *self {}
    }
}

pub fn subscribe_releases() -> Result<Receiver<Point>> {
    Err(unsupported())
}

pub fn unsubscribe_releases() {}
