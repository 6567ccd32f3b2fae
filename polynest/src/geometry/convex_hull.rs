use crate::geometry::primitives::Point;
use crate::geometry::primitives::point::cross;

/// Filters a set of points to only include those on the convex hull,
/// counterclockwise. Collinear boundary points are dropped.
pub fn convex_hull_from_points(mut points: Vec<Point>) -> Vec<Point> {
    //https://en.wikibooks.org/wiki/Algorithm_Implementation/Geometry/Convex_hull/Monotone_chain
    points.sort_by_key(|p| (p.0, p.1));
    points.dedup();

    if points.len() <= 2 {
        return points;
    }

    let mut lower_hull = points
        .iter()
        .fold(vec![], |hull, p| grow_convex_hull(hull, *p));
    let mut upper_hull = points
        .iter()
        .rev()
        .fold(vec![], |hull, p| grow_convex_hull(hull, *p));

    //First and last element of both hull parts are the same point
    upper_hull.pop();
    lower_hull.pop();

    lower_hull.append(&mut upper_hull);
    lower_hull
}

fn grow_convex_hull(mut h: Vec<Point>, next: Point) -> Vec<Point> {
    //pop all points from the hull which are made irrelevant by the new point
    while h.len() >= 2 && cross(h[h.len() - 2], h[h.len() - 1], next) <= 0 {
        h.pop();
    }
    h.push(next);
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hull_of_square_with_interior_points() {
        let points = vec![
            Point(0, 0),
            Point(10, 0),
            Point(10, 10),
            Point(0, 10),
            Point(5, 5),
            Point(3, 7),
        ];
        let hull = convex_hull_from_points(points);
        assert_eq!(
            hull,
            vec![Point(0, 0), Point(10, 0), Point(10, 10), Point(0, 10)]
        );
    }

    #[test]
    fn hull_is_counterclockwise() {
        let hull = convex_hull_from_points(vec![
            Point(0, 0),
            Point(4, 1),
            Point(2, 4),
            Point(2, 2),
        ]);
        assert_eq!(hull.len(), 3);
        for i in 0..hull.len() {
            let j = (i + 1) % hull.len();
            let k = (i + 2) % hull.len();
            assert!(cross(hull[i], hull[j], hull[k]) > 0);
        }
    }
}
