//! Integration tests for the concrete clustering scenarios and the
//! universal/boundary invariants the grid-indexed DBSCAN driver must
//! satisfy.

use gridscan_algorithms::dbscan;
use gridscan_algorithms::DbscanConfig;
use gridscan_core::{Error, PointView};

fn s1_coords() -> (Vec<f64>, Vec<f64>) {
    (
        vec![0.0, 0.0, 1.0, 1.0, 10.0, 10.0, 11.0, 11.0],
        vec![0.0, 1.0, 0.0, 1.0, 10.0, 11.0, 10.0, 11.0],
    )
}

#[test]
fn s1_two_well_separated_clusters_no_noise() {
    let (x, y) = s1_coords();
    let points = PointView::new_2d(&x, &y).unwrap();
    let mut labels = vec![0; x.len()];
    let config = DbscanConfig::new(2.0, 3);
    dbscan::run(points, &config, &mut labels).unwrap();
    assert_eq!(labels, vec![1, 1, 1, 1, 2, 2, 2, 2]);
}

#[test]
fn s2_added_outlier_is_noise_and_s1_labels_are_unchanged() {
    let (mut x, mut y) = s1_coords();
    x.push(50.0);
    y.push(50.0);
    let points = PointView::new_2d(&x, &y).unwrap();
    let mut labels = vec![0; x.len()];
    let config = DbscanConfig::new(2.0, 3);
    dbscan::run(points, &config, &mut labels).unwrap();
    assert_eq!(&labels[..8], &[1, 1, 1, 1, 2, 2, 2, 2]);
    assert_eq!(labels[8], 0);
}

#[test]
fn s3_border_point() {
    let x = [0.0, 0.0, 0.0, 0.0, 0.0];
    let y = [0.0, 1.0, 2.0, 3.0, 10.0];
    let points = PointView::new_2d(&x, &y).unwrap();
    let mut labels = vec![0; x.len()];
    let config = DbscanConfig::new(1.5, 3);
    dbscan::run(points, &config, &mut labels).unwrap();
    assert_eq!(&labels[..4], &[1, 1, 1, 1]);
    assert_eq!(labels[4], 0);
}

#[test]
fn s4_3d_cluster() {
    let mut x = Vec::with_capacity(27);
    let mut y = Vec::with_capacity(27);
    let mut z = Vec::with_capacity(27);
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                x.push(f64::from(i));
                y.push(f64::from(j));
                z.push(f64::from(k));
            }
        }
    }
    let points = PointView::new_3d(&x, &y, &z).unwrap();
    let mut labels = vec![0; 27];
    let config = DbscanConfig::new(1.1, 4);
    dbscan::run(points, &config, &mut labels).unwrap();
    assert!(labels.iter().all(|&l| l == 1));
}

#[test]
fn s5_determinism() {
    let (x, y) = s1_coords();
    let config = DbscanConfig::new(2.0, 3);

    let points_a = PointView::new_2d(&x, &y).unwrap();
    let mut labels_a = vec![0; x.len()];
    dbscan::run(points_a, &config, &mut labels_a).unwrap();

    let points_b = PointView::new_2d(&x, &y).unwrap();
    let mut labels_b = vec![0; x.len()];
    dbscan::run(points_b, &config, &mut labels_b).unwrap();

    assert_eq!(labels_a, labels_b);
}

#[test]
fn s6_zero_eps_leaves_labels_untouched_and_reports_error() {
    let (x, y) = s1_coords();
    let points = PointView::new_2d(&x, &y).unwrap();
    let mut labels = vec![-7; x.len()];
    let config = DbscanConfig::new(0.0, 3);
    let err = dbscan::run(points, &config, &mut labels).unwrap_err();
    assert_eq!(err, Error::NonPositiveEpsilon(0.0));
    assert!(labels.iter().all(|&l| l == -7));
}

#[test]
fn s6_empty_input_leaves_labels_untouched_and_reports_error() {
    let x: [f64; 0] = [];
    let y: [f64; 0] = [];
    let points = PointView::new_2d(&x, &y).unwrap();
    let mut labels: Vec<i32> = vec![];
    let config = DbscanConfig::default();
    assert_eq!(
        dbscan::run(points, &config, &mut labels).unwrap_err(),
        Error::EmptyInput
    );
}

#[test]
fn cluster_ids_form_a_dense_prefix() {
    // Three well-separated triangles, each exactly core-sized.
    let x = [0.0, 0.0, 1.0, 20.0, 20.0, 21.0, 40.0, 40.0, 41.0];
    let y = [0.0, 1.0, 0.0, 20.0, 21.0, 20.0, 40.0, 41.0, 40.0];
    let points = PointView::new_2d(&x, &y).unwrap();
    let mut labels = vec![0; x.len()];
    let config = DbscanConfig::new(1.5, 3);
    let summary = dbscan::run(points, &config, &mut labels).unwrap();

    assert_eq!(summary.clusters_found, 3);
    let mut present: Vec<i32> = labels.iter().copied().filter(|&l| l > 0).collect();
    present.sort_unstable();
    present.dedup();
    assert_eq!(present, vec![1, 2, 3]);
}

#[test]
fn min_points_one_leaves_no_noise() {
    let (x, y) = s1_coords();
    let points = PointView::new_2d(&x, &y).unwrap();
    let mut labels = vec![0; x.len()];
    let config = DbscanConfig::new(2.0, 1);
    let summary = dbscan::run(points, &config, &mut labels).unwrap();
    assert_eq!(summary.noise_points, 0);
}

#[test]
fn all_identical_points_form_one_cluster_when_min_points_allows() {
    let x = [3.0; 5];
    let y = [3.0; 5];
    let points = PointView::new_2d(&x, &y).unwrap();
    let mut labels = vec![0; 5];
    let config = DbscanConfig::new(0.1, 5);
    let summary = dbscan::run(points, &config, &mut labels).unwrap();
    assert_eq!(summary.clusters_found, 1);
    assert!(labels.iter().all(|&l| l == 1));
}

#[test]
fn all_identical_points_are_noise_when_min_points_exceeds_n() {
    let x = [3.0; 5];
    let y = [3.0; 5];
    let points = PointView::new_2d(&x, &y).unwrap();
    let mut labels = vec![0; 5];
    let config = DbscanConfig::new(0.1, 6);
    let summary = dbscan::run(points, &config, &mut labels).unwrap();
    assert_eq!(summary.clusters_found, 0);
    assert!(labels.iter().all(|&l| l == 0));
}

#[test]
fn single_point_min_points_one_is_a_cluster_of_one() {
    let x = [0.0];
    let y = [0.0];
    let points = PointView::new_2d(&x, &y).unwrap();
    let mut labels = vec![0; 1];
    let config = DbscanConfig::new(1.0, 1);
    let summary = dbscan::run(points, &config, &mut labels).unwrap();
    assert_eq!(labels, vec![1]);
    assert_eq!(summary.clusters_found, 1);
}

#[test]
fn single_point_min_points_two_or_more_is_noise() {
    let x = [0.0];
    let y = [0.0];
    let points = PointView::new_2d(&x, &y).unwrap();
    let mut labels = vec![0; 1];
    let config = DbscanConfig::new(1.0, 2);
    let summary = dbscan::run(points, &config, &mut labels).unwrap();
    assert_eq!(labels, vec![0]);
    assert_eq!(summary.clusters_found, 0);
}

#[test]
fn increasing_eps_never_increases_noise_count() {
    let x = [0.0, 0.3, 0.9, 5.0, 5.4, 20.0, 45.0];
    let y = [0.0, 0.2, 0.8, 5.1, 5.3, 20.0, 45.0];
    let mut previous = usize::MAX;
    for eps in [0.1, 0.5, 1.0, 2.0, 6.0, 25.0, 60.0] {
        let points = PointView::new_2d(&x, &y).unwrap();
        let mut labels = vec![0; x.len()];
        let config = DbscanConfig::new(eps, 2);
        let summary = dbscan::run(points, &config, &mut labels).unwrap();
        assert!(summary.noise_points <= previous, "noise grew as eps increased to {eps}");
        previous = summary.noise_points;
    }
}

#[test]
fn every_cluster_contains_at_least_one_core_point() {
    let (x, y) = s1_coords();
    let points = PointView::new_2d(&x, &y).unwrap();
    let eps = 2.0;
    let min_points = 3;
    let mut labels = vec![0; x.len()];
    let config = DbscanConfig::new(eps, min_points);
    dbscan::run(points, &config, &mut labels).unwrap();

    let view = PointView::new_2d(&x, &y).unwrap();
    let max_cluster = labels.iter().copied().max().unwrap();
    for cluster_id in 1..=max_cluster {
        let members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == cluster_id)
            .map(|(i, _)| i)
            .collect();
        assert!(!members.is_empty());
        let has_core = members.iter().any(|&p| {
            let neighbor_count = (0..view.len())
                .filter(|&q| view.distance_squared(p, q) <= eps * eps)
                .count();
            neighbor_count >= min_points
        });
        assert!(has_core, "cluster {cluster_id} has no core point");
    }
}
