use std::f64::consts::TAU;

use super::model::{Graph, GraphError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub width: f64,
    pub height: f64,
    pub iterations: u32,
    pub repulsion: f64,
    pub edge_length: f64,
    pub spring: f64,
    pub gravity: f64,
    /// Keeps node centres this far from the viewport edge.
    pub margin: f64,
}

impl LayoutParams {
    /// Settings for the large overview canvas.
    #[must_use]
    pub fn overview() -> Self {
        Self {
            width: 1200.0,
            height: 720.0,
            iterations: 300,
            repulsion: 1500.0 * 40.0,
            edge_length: 220.0,
            spring: 0.05,
            gravity: 0.1,
            margin: 60.0,
        }
    }

    /// Settings for the per-subject relation graph.
    #[must_use]
    pub fn subject() -> Self {
        Self {
            width: 900.0,
            height: 500.0,
            iterations: 300,
            repulsion: 500.0 * 40.0,
            edge_length: 130.0,
            spring: 0.08,
            gravity: 0.05,
            margin: 60.0,
        }
    }
}

impl LayoutParams {
    fn is_usable(&self) -> bool {
        let values = [
            self.width,
            self.height,
            self.repulsion,
            self.edge_length,
            self.spring,
            self.gravity,
            self.margin,
        ];
        values.iter().all(|value| value.is_finite())
            && self.margin >= 0.0
            && self.width > 2.0 * self.margin
            && self.height > 2.0 * self.margin
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    /// Node positions, parallel to `Graph::nodes`.
    pub positions: Vec<Point>,
}

/// Deterministic force-directed placement: nodes start on a circle, repel
/// each other, edges pull towards `edge_length`, and gravity pulls to the
/// centre. Movement per iteration cools linearly.
///
/// # Errors
///
/// Returns `GraphError::Layout` for unusable parameters or if any coordinate
/// ends up non-finite.
pub fn force_layout(graph: &Graph, params: LayoutParams) -> Result<Layout, GraphError> {
    if !params.is_usable() {
        return Err(GraphError::Layout);
    }

    let count = graph.nodes().len();
    let cx = params.width / 2.0;
    let cy = params.height / 2.0;
    let radius = params.width.min(params.height) / 3.0;

    let mut positions: Vec<Point> = (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count.max(1) as f64;
            Point {
                x: cx + radius * angle.cos(),
                y: cy + radius * angle.sin(),
            }
        })
        .collect();

    let max_step = params.width.max(params.height) / 10.0;
    let mut displacement = vec![Point { x: 0.0, y: 0.0 }; count];

    for iteration in 0..params.iterations {
        displacement.fill(Point { x: 0.0, y: 0.0 });

        for i in 0..count {
            for j in (i + 1)..count {
                let dx = positions[i].x - positions[j].x;
                let dy = positions[i].y - positions[j].y;
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                let force = params.repulsion / (dist * dist);
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                displacement[i].x += fx;
                displacement[i].y += fy;
                displacement[j].x -= fx;
                displacement[j].y -= fy;
            }
        }

        for &(source, target) in graph.endpoints() {
            if source == target {
                continue;
            }
            let dx = positions[source].x - positions[target].x;
            let dy = positions[source].y - positions[target].y;
            let dist = (dx * dx + dy * dy).sqrt().max(0.01);
            let force = (dist - params.edge_length) * params.spring;
            let (fx, fy) = (dx / dist * force, dy / dist * force);
            displacement[source].x -= fx;
            displacement[source].y -= fy;
            displacement[target].x += fx;
            displacement[target].y += fy;
        }

        let temperature =
            max_step * (1.0 - f64::from(iteration) / f64::from(params.iterations.max(1)));
        for (position, delta) in positions.iter_mut().zip(&displacement) {
            let dx = delta.x + (cx - position.x) * params.gravity;
            let dy = delta.y + (cy - position.y) * params.gravity;
            let len = (dx * dx + dy * dy).sqrt();
            if len > 0.0 {
                let step = len.min(temperature);
                position.x += dx / len * step;
                position.y += dy / len * step;
            }
            position.x = position.x.clamp(params.margin, params.width - params.margin);
            position.y = position.y.clamp(params.margin, params.height - params.margin);
        }
    }

    if positions.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(GraphError::Layout);
    }

    Ok(Layout {
        width: params.width,
        height: params.height,
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::datasets::knowledge_graph;

    #[test]
    fn positions_stay_inside_the_viewport() {
        let graph = knowledge_graph().unwrap();
        let params = LayoutParams::overview();
        let layout = force_layout(&graph, params).unwrap();

        assert_eq!(layout.positions.len(), graph.nodes().len());
        for point in &layout.positions {
            assert!(point.x >= params.margin && point.x <= params.width - params.margin);
            assert!(point.y >= params.margin && point.y <= params.height - params.margin);
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let graph = knowledge_graph().unwrap();
        let first = force_layout(&graph, LayoutParams::overview()).unwrap();
        let second = force_layout(&graph, LayoutParams::overview()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn nodes_do_not_collapse_onto_each_other() {
        let graph = knowledge_graph().unwrap();
        let layout = force_layout(&graph, LayoutParams::overview()).unwrap();
        for (i, a) in layout.positions.iter().enumerate() {
            for b in &layout.positions[i + 1..] {
                let dist = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                assert!(dist > 1.0, "nodes overlap: {a:?} {b:?}");
            }
        }
    }

    #[test]
    fn empty_graph_lays_out_to_nothing() {
        let graph = Graph::new(Vec::new(), Vec::new()).unwrap();
        let layout = force_layout(&graph, LayoutParams::subject()).unwrap();
        assert!(layout.positions.is_empty());
    }

    #[test]
    fn viewport_smaller_than_margins_is_rejected() {
        let graph = knowledge_graph().unwrap();
        let params = LayoutParams {
            width: 100.0,
            ..LayoutParams::overview()
        };
        assert_eq!(force_layout(&graph, params), Err(GraphError::Layout));
    }

    #[test]
    fn non_finite_parameters_surface_as_layout_error() {
        let graph = knowledge_graph().unwrap();
        let params = LayoutParams {
            repulsion: f64::NAN,
            ..LayoutParams::overview()
        };
        assert_eq!(force_layout(&graph, params), Err(GraphError::Layout));
    }
}
