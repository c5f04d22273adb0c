use crate::prelude::*;
use plotters::prelude::*;

/// Colour with all channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn lerp(&self, other: &Rgba, ratio: f64) -> Rgba {
        Rgba {
            r: self.r + (other.r - self.r) * ratio,
            g: self.g + (other.g - self.g) * ratio,
            b: self.b + (other.b - self.b) * ratio,
            a: self.a + (other.a - self.a) * ratio,
        }
    }

    fn to_plotters(self) -> RGBAColor {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        RGBAColor(channel(self.r), channel(self.g), channel(self.b), self.a.clamp(0.0, 1.0))
    }
}

/// Draws a network as columns of circles, one column per layer width, each
/// node coloured by the value it held in the latest capturing pass.
///
/// The view only reads topology and captured state; it never touches the
/// network's parameters.
#[derive(Debug, Clone)]
pub struct NetworkView {
    pub node_width: f64,
    /// Values at `±abs_range` map to the full negative/positive colour.
    /// Must be positive.
    pub abs_range: f64,
    pub neg_color: Rgba,
    pub zero_color: Rgba,
    pub pos_color: Rgba,
    width: u32,
    height: u32,
    layer_sizes: Vec<usize>,
    node_positions: Vec<Vec<(f64, f64)>>,
}

impl NetworkView {
    pub fn new(network: &Network, width: u32, height: u32) -> Self {
        let mut view = Self {
            node_width: 10.0,
            abs_range: 1.0,
            neg_color: Rgba::new(1.0, 0.0, 0.0, 1.0),
            zero_color: Rgba::new(0.0, 0.0, 0.0, 0.0),
            pos_color: Rgba::new(1.0, 1.0, 1.0, 1.0),
            width,
            height,
            layer_sizes: network.layer_sizes(),
            node_positions: Vec::new(),
        };
        view.resize(width, height);
        view
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Node centres, indexed `[column][node]`.
    pub fn node_positions(&self) -> &[Vec<(f64, f64)>] {
        &self.node_positions
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        let (w, h) = (width as f64, height as f64);
        let num_columns = self.layer_sizes.len();
        let biggest = self.layer_sizes.iter().copied().max().unwrap_or(0);
        // one extra column of margin on each side, num_layers = num_columns - 1
        let x_spacing = w / (num_columns + 1) as f64;
        let y_spacing = h / (biggest + 1) as f64;

        self.node_positions = self
            .layer_sizes
            .iter()
            .enumerate()
            .map(|(c, &n)| {
                let x = x_spacing * (c + 1) as f64;
                let top = (h - y_spacing * (n as f64 - 1.0)) / 2.0;
                (0..n).map(|j| (x, top + y_spacing * j as f64)).collect()
            })
            .collect();
    }

    pub fn gradient_map(&self, x: f64) -> Rgba {
        if x < 0.0 {
            let ratio = ((x + self.abs_range) / self.abs_range).clamp(0.0, 1.0);
            self.neg_color.lerp(&self.zero_color, ratio)
        } else if x > 0.0 {
            let ratio = (x / self.abs_range).clamp(0.0, 1.0);
            self.zero_color.lerp(&self.pos_color, ratio)
        } else {
            self.zero_color
        }
    }

    /// Colour of every node, indexed like `node_positions`.
    pub fn node_colors(&self, state: StateView<'_>) -> Vec<Vec<Rgba>> {
        (0..self.layer_sizes.len())
            .map(|c| {
                state
                    .column(c)
                    .unwrap_or(&[])
                    .iter()
                    .map(|&value| self.gradient_map(value))
                    .collect()
            })
            .collect()
    }

    pub fn draw(&self, network: &Network, filename: &str) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(filename, (self.width, self.height)).into_drawing_area();
        root.fill(&BLACK)?;

        let radius = (self.node_width / 2.0).round() as i32;
        let colors = self.node_colors(network.state());
        for (column, column_colors) in self.node_positions.iter().zip(colors.iter()) {
            for (&(x, y), color) in column.iter().zip(column_colors.iter()) {
                root.draw(&Circle::new(
                    (x.round() as i32, y.round() as i32),
                    radius,
                    color.to_plotters().filled(),
                ))?;
            }
        }

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_layout() {
        let net = Network::new(&[2, 4, 1]).unwrap();
        let view = NetworkView::new(&net, 320, 180);
        let pos = view.node_positions();

        assert_eq!(pos.len(), 3);
        assert_eq!(pos.iter().map(Vec::len).collect::<Vec<_>>(), vec![2, 4, 1]);

        // columns at width / (num_layers + 2) steps
        assert_relative_eq!(pos[0][0].0, 80.0);
        assert_relative_eq!(pos[1][0].0, 160.0);
        assert_relative_eq!(pos[2][0].0, 240.0);

        // the widest column spans rows 1..=4 of height / 5
        assert_relative_eq!(pos[1][0].1, 36.0);
        assert_relative_eq!(pos[1][3].1, 144.0);
        // single node sits in the middle
        assert_relative_eq!(pos[2][0].1, 90.0);
    }

    #[test]
    fn test_gradient_map() {
        let net = Network::new(&[1, 1]).unwrap();
        let view = NetworkView::new(&net, 100, 100);

        assert_eq!(view.gradient_map(0.0), view.zero_color);
        assert_eq!(view.gradient_map(1.0), view.pos_color);
        assert_eq!(view.gradient_map(-1.0), view.neg_color);
        assert_eq!(view.gradient_map(5.0), view.pos_color);

        let half = view.gradient_map(0.5);
        assert_relative_eq!(half.r, 0.5);
        assert_relative_eq!(half.a, 0.5);

        let neg_half = view.gradient_map(-0.5);
        assert_relative_eq!(neg_half.r, 0.5);
        assert_relative_eq!(neg_half.g, 0.0);
    }

    #[test]
    fn test_node_colors_follow_state() {
        let mut net = Network::new(&[2, 1]).unwrap();
        net.from_staggered_array(&[0.0, 1.0, 1.0]).unwrap();
        net.calculate_with_state(&[1.0, -1.0]).unwrap();

        let view = NetworkView::new(&net, 100, 100);
        let colors = view.node_colors(net.state());
        assert_eq!(colors[0], vec![view.pos_color, view.neg_color]);
        assert_eq!(colors[1], vec![view.zero_color]);
    }

    #[test]
    fn test_draw_writes_png() {
        let mut net = Network::new(&[2, 3, 1]).unwrap();
        net.randomize();
        net.calculate_with_state(&[0.5, -0.5]).unwrap();

        let path = std::env::temp_dir().join("perceptron_test_draw.png");
        let view = NetworkView::new(&net, 64, 48);
        view.draw(&net, path.to_str().unwrap()).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).unwrap();
    }
}
