use crate::kdtree::{KdTree, Point};
use colored::*;
use geojson::{Feature, FeatureCollection, Geometry, Value};

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format_point(point: &Point) -> String {
        point.to_string().cyan().to_string()
    }

    pub fn format_contains(point: &Point, found: bool) -> String {
        if found {
            format!("{} {}", Self::format_point(point), "found".green())
        } else {
            format!("{} {}", Self::format_point(point), "not found".red())
        }
    }

    pub fn format_points(points: &[Point]) -> String {
        if points.is_empty() {
            return "(empty)".yellow().to_string();
        }

        let mut result = String::new();
        for (i, point) in points.iter().enumerate() {
            result.push_str(&format!("{}) {}\n", (i + 1).to_string().blue(), point));
        }
        result.trim_end().to_string()
    }

    pub fn format_nearest(query: &Point, nearest: Option<(Point, f64)>) -> String {
        match nearest {
            Some((point, distance_squared)) => format!(
                "{} (distance {})",
                Self::format_point(&point),
                distance_squared.sqrt().to_string().cyan()
            ),
            None => format!("{} for {}", "(empty tree)".yellow(), query),
        }
    }

    pub fn format_stats(tree: &KdTree) -> String {
        format!(
            "size:   {}\ndepth:  {}\nbounds: {}",
            tree.len().to_string().cyan(),
            tree.depth().to_string().cyan(),
            tree.bounds()
        )
    }

    pub fn format_error(err: &str) -> String {
        format!("(error) {}", err.red())
    }

    pub fn points_to_json(points: &[Point]) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(points)
    }

    /// 以 GeoJSON FeatureCollection 输出，每个点一个 Point feature
    pub fn points_to_geojson(points: &[Point]) -> Result<String, serde_json::Error> {
        let features: Vec<Feature> = points
            .iter()
            .map(|point| Feature::from(Geometry::new(Value::Point(vec![point.x, point.y]))))
            .collect();
        let collection = FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        };
        serde_json::to_string_pretty(&collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 注意：测试时不检查颜色代码，只检查内容

    #[test]
    fn test_format_points() {
        let points = vec![Point::new(0.5, 0.4), Point::new(0.2, 0.3)];
        let result = OutputFormatter::format_points(&points);
        assert!(result.contains("(0.5, 0.4)"));
        assert!(result.contains("(0.2, 0.3)"));
        assert_eq!(result.lines().count(), 2);

        assert!(OutputFormatter::format_points(&[]).contains("empty"));
    }

    #[test]
    fn test_format_contains() {
        let point = Point::new(0.2, 0.3);
        assert!(OutputFormatter::format_contains(&point, true).contains("found"));
        assert!(OutputFormatter::format_contains(&point, false).contains("not found"));
    }

    #[test]
    fn test_format_nearest() {
        let query = Point::new(0.0, 0.0);
        let result = OutputFormatter::format_nearest(&query, Some((Point::new(3.0, 4.0), 25.0)));
        assert!(result.contains("(3, 4)"));
        assert!(result.contains("5"));

        let result = OutputFormatter::format_nearest(&query, None);
        assert!(result.contains("empty tree"));
    }

    #[test]
    fn test_format_stats() {
        let mut tree = KdTree::new();
        tree.insert(&Point::new(0.5, 0.5)).unwrap();
        let result = OutputFormatter::format_stats(&tree);
        assert!(result.contains("size"));
        assert!(result.contains("1"));
    }

    #[test]
    fn test_points_to_json() {
        let json = OutputFormatter::points_to_json(&[Point::new(0.5, 0.25)]).unwrap();
        let parsed: Vec<Point> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![Point::new(0.5, 0.25)]);
    }

    #[test]
    fn test_points_to_geojson() {
        let json = OutputFormatter::points_to_geojson(&[
            Point::new(0.5, 0.25),
            Point::new(0.1, 0.9),
        ])
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["type"], "FeatureCollection");
        assert_eq!(parsed["features"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["features"][0]["geometry"]["type"], "Point");
        assert_eq!(parsed["features"][0]["geometry"]["coordinates"][1], 0.25);
    }
}
