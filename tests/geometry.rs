mod common;

use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use rstest::rstest;

use raycaster::geometry::{
    DISTANT_POINT, Point, Ray, Segment, intersect_ray, intersecting_segments,
};

use common::segment;

#[rstest]
#[case(segment(0.0, 0.0, 10.0, 10.0), segment(0.0, 10.0, 10.0, 0.0))]
#[case(segment(-3.0, 1.0, 7.0, 2.0), segment(2.0, -4.0, 2.5, 9.0))]
#[case(segment(0.0, 0.0, 4.0, 0.0), segment(4.0, 0.0, 4.0, 3.0))]
#[case(segment(0.0, 0.0, 1.0, 1.0), segment(5.0, 5.0, 6.0, 7.0))]
#[case(segment(0.0, 0.0, 4.0, 0.0), segment(1.0, 0.0, 3.0, 0.0))]
fn crossing_does_not_depend_on_order(#[case] a: Segment, #[case] b: Segment) {
    match (a.intersection(&b), b.intersection(&a)) {
        (Some(p), Some(q)) => {
            assert_relative_eq!(p.x, q.x, epsilon = 1e-9);
            assert_relative_eq!(p.y, q.y, epsilon = 1e-9);
        }
        (None, None) => {}
        (p, q) => panic!("{a:?} x {b:?} disagree: {p:?} vs {q:?}"),
    }
}

#[rstest]
#[case(0.0, 0.0, 1.0)]
#[case(FRAC_PI_2, 1.0, 0.0)]
#[case(PI, 0.0, -1.0)]
#[case(3.0 * FRAC_PI_2, -1.0, 0.0)]
fn rays_point_along_the_compass(#[case] angle: f64, #[case] dx: f64, #[case] dy: f64) {
    let ray = Ray::new(Point::new(2.0, -1.0), angle);
    let end = ray.end_point(3.0);
    assert_relative_eq!(end.x, 2.0 + 3.0 * dx, epsilon = 1e-12);
    assert_relative_eq!(end.y, -1.0 + 3.0 * dy, epsilon = 1e-12);

    let reach = ray.to_segment(DISTANT_POINT);
    assert_eq!(reach.start, ray.start);
    assert_eq!(
        reach.end,
        Point::new(2.0 + angle.sin() * DISTANT_POINT, -1.0 + angle.cos() * DISTANT_POINT)
    );
    assert_relative_eq!(reach.length(), DISTANT_POINT, epsilon = 1e-9);
}

#[test]
fn walls_beyond_reach_are_missed() {
    let far = segment(-1.0, DISTANT_POINT + 1.0, 1.0, DISTANT_POINT + 1.0);
    assert!(intersect_ray(&Ray::new(Point::default(), 0.0), &[far]).is_empty());
}

#[test]
fn both_query_directions_find_the_same_point_at_their_own_distance() {
    let a = segment(0.0, 0.0, 10.0, 10.0);
    let b = segment(2.0, 8.0, 8.0, 2.0);

    let from_a = intersecting_segments(&a, &[b]);
    let from_b = intersecting_segments(&b, &[a]);
    assert_eq!((from_a.len(), from_b.len()), (1, 1));

    let (hit_a, hit_b) = (from_a[0], from_b[0]);
    assert_relative_eq!(hit_a.intersection.x, hit_b.intersection.x, epsilon = 1e-9);
    assert_relative_eq!(hit_a.intersection.y, hit_b.intersection.y, epsilon = 1e-9);
    assert_eq!(hit_a.segment, b);
    assert_eq!(hit_b.segment, a);

    // each distance is measured from its own query's start
    assert_relative_eq!(hit_a.distance, 50.0_f64.sqrt(), epsilon = 1e-9);
    assert_relative_eq!(hit_b.distance, 18.0_f64.sqrt(), epsilon = 1e-9);
    assert!((hit_a.distance - hit_b.distance).abs() > 1.0);
}
