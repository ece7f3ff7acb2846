#![forbid(unsafe_code)]

//! Render one tool invocation headlessly and replay scripted input against it.

use chrono::{DateTime, Utc};
use cviz_core::geometry::Rect;
use cviz_core::page::Page;
use cviz_render::frame::{Frame, HitId};
use cviz_tools::{Invocation, InvocationAction};
use serde_json::Value;

use crate::config::{DemoConfig, OVERLAY_HEIGHT};
use crate::error::Result;
use crate::keys::ScriptStep;

/// Upper bound on animation frames a `tick` step runs.
const MAX_TICKS: usize = 240;

pub struct Session {
    page: Page,
    invocation: Invocation,
    config: DemoConfig,
    frame: Frame,
}

impl Session {
    pub fn new(tool: &str, input: Value, config: DemoConfig, now: Option<DateTime<Utc>>) -> Result<Self> {
        let page = Page::new();
        let mut invocation = Invocation::new(tool, input, page.clone(), HitId::new(1))?;
        if let Some(now) = now {
            invocation = invocation.now(now);
        }
        let mut session = Self {
            page,
            invocation,
            config,
            frame: Frame::new(1, 1),
        };
        session.redraw();
        Ok(session)
    }

    fn frame_height(&self) -> u16 {
        let card = self.invocation.height(self.config.width);
        self.config.height.unwrap_or_else(|| {
            if self.invocation.has_overlay() {
                card.max(OVERLAY_HEIGHT)
            } else {
                card
            }
        })
    }

    /// Render the card and any overlay into a fresh frame.
    pub fn redraw(&mut self) {
        let height = self.frame_height();
        let mut frame = Frame::with_hit_grid(self.config.width, height);
        let card = self.invocation.height(self.config.width).min(height);
        self.invocation
            .render(Rect::new(0, 0, self.config.width, card), &mut frame);
        self.invocation.render_overlay(frame.bounds(), &mut frame);
        self.frame = frame;
    }

    /// Apply one step and redraw.
    pub fn step(&mut self, step: ScriptStep) -> Option<InvocationAction> {
        let action = match (step, step.event()) {
            (ScriptStep::Tick, _) => {
                let mut frames = 0;
                while self.invocation.tick() && frames < MAX_TICKS {
                    frames += 1;
                }
                tracing::debug!(message = "demo.tick", frames);
                None
            }
            (ScriptStep::Click { x, y }, Some(event)) => {
                let hit = self.frame.hit_test(x, y);
                self.invocation.handle_event(&event, hit)
            }
            (_, Some(event)) => self.invocation.handle_event(&event, None),
            (_, None) => None,
        };
        tracing::debug!(message = "demo.step", step = ?step, action = ?action);
        self.redraw();
        action
    }

    pub fn run(&mut self, script: &[ScriptStep]) {
        for &step in script {
            self.step(step);
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.frame.to_lines()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }
}
