//! Scatter trace and layout construction
//!
//! Serializes to the JSON shape accepted by plotly's `newPlot`.

use promptcloud_core::ColoredPointCloud3f;
use serde::{Deserialize, Serialize};

/// Format three color channels as a CSS `rgb(r,g,b)` triple
pub fn rgb_string([r, g, b]: [u8; 3]) -> String {
    format!("rgb({r},{g},{b})")
}

/// Fixed marker styling shared by every render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub size: f32,
    pub opacity: f32,
    /// Color scale applied when points carry no colors of their own
    pub colorscale: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: 2.0,
            opacity: 0.8,
            colorscale: "Viridis".to_string(),
        }
    }
}

/// Per-point marker colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerColor {
    /// Explicit CSS colors, one per point
    Css(Vec<String>),
    /// Scalar values mapped through the color scale
    Scale(Vec<f32>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub size: f32,
    pub opacity: f32,
    pub color: MarkerColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
}

/// A 3D scatter trace with parallel coordinate arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    #[serde(rename = "type")]
    pub kind: String,
    pub mode: String,
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
    pub marker: Marker,
}

impl ScatterTrace {
    /// Decompose a point cloud into a trace
    ///
    /// Colors are used only when every point carries them; otherwise the
    /// marker colors follow the z coordinate through the style's color scale.
    pub fn from_cloud(cloud: &ColoredPointCloud3f, style: &MarkerStyle) -> Self {
        let len = cloud.len();
        let mut x = Vec::with_capacity(len);
        let mut y = Vec::with_capacity(len);
        let mut z = Vec::with_capacity(len);
        for p in cloud {
            x.push(p.position.x);
            y.push(p.position.y);
            z.push(p.position.z);
        }

        let (color, colorscale) = if cloud.is_fully_colored() {
            let colors = cloud.iter().filter_map(|p| p.color).map(rgb_string).collect();
            (MarkerColor::Css(colors), None)
        } else {
            (MarkerColor::Scale(z.clone()), Some(style.colorscale.clone()))
        };

        Self {
            kind: "scatter3d".to_string(),
            mode: "markers".to_string(),
            x,
            y,
            z,
            marker: Marker {
                size: style.size,
                opacity: style.opacity,
                color,
                colorscale,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// CSS colors of the markers, if the trace carries explicit colors
    pub fn css_colors(&self) -> Option<&[String]> {
        match &self.marker.color {
            MarkerColor::Css(colors) => Some(colors),
            MarkerColor::Scale(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
}

/// Plot layout shared by every render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub title: String,
    pub scene: Scene,
    pub margin: Margin,
}

impl Default for PlotLayout {
    fn default() -> Self {
        let axis = |title: &str| Axis { title: title.to_string() };
        Self {
            title: "3D Point Cloud Visualization".to_string(),
            scene: Scene {
                xaxis: axis("X"),
                yaxis: axis("Y"),
                zaxis: axis("Z"),
            },
            margin: Margin { l: 0, r: 0, b: 0, t: 30 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptcloud_core::ColoredPoint3f;
    use serde_json::json;

    #[test]
    fn test_colored_point_at_origin() {
        let cloud = ColoredPointCloud3f::from_points(vec![ColoredPoint3f::with_color(0.0, 0.0, 0.0, [255, 0, 0])]);
        let trace = ScatterTrace::from_cloud(&cloud, &MarkerStyle::default());

        assert_eq!(trace.len(), 1);
        assert_eq!((trace.x[0], trace.y[0], trace.z[0]), (0.0, 0.0, 0.0));
        assert_eq!(trace.css_colors(), Some(&["rgb(255,0,0)".to_string()][..]));
        assert!(trace.marker.colorscale.is_none());
    }

    #[test]
    fn test_uncolored_points_use_z_scale() {
        let cloud = ColoredPointCloud3f::from_points(vec![
            ColoredPoint3f::new(0.0, 0.0, 1.0),
            ColoredPoint3f::with_color(0.0, 0.0, 2.0, [0, 0, 255]),
        ]);
        let trace = ScatterTrace::from_cloud(&cloud, &MarkerStyle::default());

        assert_eq!(trace.marker.color, MarkerColor::Scale(vec![1.0, 2.0]));
        assert_eq!(trace.marker.colorscale.as_deref(), Some("Viridis"));
    }

    #[test]
    fn test_serialized_shape() {
        let cloud = ColoredPointCloud3f::from_points(vec![ColoredPoint3f::with_color(1.0, 2.0, 3.0, [1, 2, 3])]);
        let trace = ScatterTrace::from_cloud(&cloud, &MarkerStyle::default());
        let value = serde_json::to_value(&trace).unwrap();

        assert_eq!(value["type"], "scatter3d");
        assert_eq!(value["mode"], "markers");
        assert_eq!(value["marker"]["color"], json!(["rgb(1,2,3)"]));
        assert!(value["marker"].get("colorscale").is_none());

        let layout = serde_json::to_value(PlotLayout::default()).unwrap();
        assert_eq!(layout["scene"]["zaxis"]["title"], "Z");
        assert_eq!(layout["margin"]["t"], 30);
    }
}
