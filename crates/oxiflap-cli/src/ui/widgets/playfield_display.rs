use oxiflap_engine::{
    Avatar, GROUND_Y, Ground, Obstacle, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, WorldSnapshot,
};
use ratatui::{
    prelude::{Buffer, Rect},
    symbols::Marker,
    text::Line,
    widgets::{
        Block, Widget,
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle},
    },
};

use crate::ui::widgets::{color, style};

/// Draws one frame of the playfield on a braille canvas.
///
/// World coordinates grow downwards while the canvas grows upwards, so every
/// `y` goes through [`flip`].
#[derive(Debug)]
pub struct PlayfieldDisplay<'a> {
    snapshot: &'a WorldSnapshot<'a>,
}

impl<'a> PlayfieldDisplay<'a> {
    pub fn new(snapshot: &'a WorldSnapshot<'a>) -> Self {
        Self { snapshot }
    }

    fn title(&self) -> Line<'static> {
        let snapshot = self.snapshot;
        Line::from(format!(
            " Generation {} | Birds {} | Score {} | Best {} ",
            snapshot.generation(),
            snapshot.avatars().len(),
            snapshot.score(),
            snapshot.best_score(),
        ))
        .style(style::TITLE)
        .centered()
    }

    fn paint(&self, ctx: &mut Context<'_>) {
        for obstacle in self.snapshot.obstacles() {
            draw_obstacle(ctx, obstacle);
        }
        draw_ground(ctx, self.snapshot.ground());
        ctx.layer();

        for avatar in self.snapshot.avatars() {
            let (x, y) = center(avatar);
            ctx.draw(&Circle {
                x,
                y,
                radius: f64::from(Avatar::HEIGHT) / 2.0,
                color: color::BIRD,
            });
        }

        if let Some(obstacle) = self.snapshot.nearest_obstacle() {
            let guide_x = f64::from(obstacle.x()) + f64::from(Obstacle::WIDTH) / 2.0;
            for avatar in self.snapshot.avatars() {
                let (x, y) = center(avatar);
                for edge in [obstacle.top_edge(), obstacle.bottom_edge()] {
                    ctx.draw(&CanvasLine {
                        x1: x,
                        y1: y,
                        x2: guide_x,
                        y2: flip(edge),
                        color: color::GUIDE,
                    });
                }
            }
        }
    }
}

fn flip(y: f32) -> f64 {
    f64::from(PLAYFIELD_HEIGHT - y)
}

fn center(avatar: &Avatar) -> (f64, f64) {
    (
        f64::from(avatar.x()) + f64::from(Avatar::WIDTH) / 2.0,
        flip(avatar.y()) - f64::from(Avatar::HEIGHT) / 2.0,
    )
}

fn draw_obstacle(ctx: &mut Context<'_>, obstacle: &Obstacle) {
    let x = f64::from(obstacle.x());
    let width = f64::from(Obstacle::WIDTH);
    // the top sprite reaches above the playfield; clip it at y = 0
    let top = obstacle.top_edge().max(0.0);
    ctx.draw(&Rectangle {
        x,
        y: flip(top),
        width,
        height: f64::from(top),
        color: color::PIPE,
    });
    let bottom = obstacle.bottom_edge().min(GROUND_Y);
    ctx.draw(&Rectangle {
        x,
        y: flip(GROUND_Y),
        width,
        height: f64::from(GROUND_Y - bottom),
        color: color::PIPE,
    });
}

fn draw_ground(ctx: &mut Context<'_>, ground: &Ground) {
    let y = flip(ground.y());
    ctx.draw(&CanvasLine {
        x1: 0.0,
        y1: y,
        x2: f64::from(PLAYFIELD_WIDTH),
        y2: y,
        color: color::GROUND,
    });
    // tile seams make the scrolling visible
    for seam in ground.tile_offsets() {
        if (0.0..=PLAYFIELD_WIDTH).contains(&seam) {
            ctx.draw(&CanvasLine {
                x1: f64::from(seam),
                y1: y,
                x2: f64::from(seam),
                y2: 0.0,
                color: color::GROUND,
            });
        }
    }
}

impl Widget for PlayfieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PlayfieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Canvas::default()
            .block(Block::bordered().title(self.title()).style(style::DEFAULT))
            .marker(Marker::Braille)
            .background_color(color::SKY)
            .x_bounds([0.0, f64::from(PLAYFIELD_WIDTH)])
            .y_bounds([0.0, f64::from(PLAYFIELD_HEIGHT)])
            .paint(|ctx| self.paint(ctx))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use oxiflap_engine::{
        Action, Controller, Generation, ObstacleGenerator, Observation, Session,
    };

    use super::*;

    struct Idle;

    impl Controller for Idle {
        fn observe_and_act(&mut self, _: &Observation) -> Action {
            Action::idle()
        }
    }

    fn render(display: &PlayfieldDisplay<'_>) -> String {
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_title_shows_counters() {
        let mut session = Session::new();
        let obstacles = [Obstacle::new(Obstacle::SPAWN_X, 200.0)];
        let generation = Generation::with_obstacles(
            &mut session,
            [Idle, Idle, Idle],
            ObstacleGenerator::default(),
            obstacles,
        );
        let snapshot = generation.snapshot();

        let text = render(&PlayfieldDisplay::new(&snapshot));
        assert!(text.contains("Generation 1 | Birds 3 | Score 0 | Best 0"), "{text}");
    }

    #[test]
    fn test_renders_without_obstacles() {
        let mut session = Session::new();
        let generation = Generation::with_obstacles(
            &mut session,
            [Idle],
            ObstacleGenerator::default(),
            Vec::<Obstacle>::new(),
        );
        let snapshot = generation.snapshot();
        assert!(snapshot.nearest_obstacle().is_none());

        let text = render(&PlayfieldDisplay::new(&snapshot));
        assert!(text.contains("Birds 1"), "{text}");
    }
}
