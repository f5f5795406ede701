use ndview::prelude::*;

use itertools::{assert_equal, Itertools};

fn cube() -> Array<i32, R3, R3> {
    Array::from_shape_fn([2, 3, 4], |[i, j, k]| (100 * i + 10 * j + k) as i32)
}

#[test]
fn iter_visits_first_axis() {
    let a = cube();
    let planes: Vec<ArrayRef<i32, R2, R2>> = a.iter().collect();
    assert_eq!(planes.len(), 2);
    assert_eq!(planes[1], a.at(1));

    let mut n = 0;
    for plane in &a {
        for row in &plane {
            assert_eq!(row.iter().len(), 4);
            n += row.iter().map(|x| x.get()).count();
        }
    }
    assert_eq!(n, a.num_elements());
}

#[test]
fn iteration_is_restartable() {
    let a = cube();
    let row = a.at(1).at(2);
    let first: Vec<i32> = row.iter().map(|x| x.get()).collect();
    let second: Vec<i32> = row.iter().map(|x| x.get()).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec![120, 121, 122, 123]);
}

#[test]
fn reverse_and_size() {
    let a = cube();
    let it = a.iter();
    assert_eq!(it.len(), 2);
    let rev: Vec<_> = a.iter().rev().collect();
    assert_eq!(rev[0], a.at(1));
    let plane = a.at(0);
    let mut it = plane.iter();
    it.next();
    assert_eq!(it.len(), 2);
    assert_eq!(it.next_back().unwrap(), plane.at(2));
    assert_eq!(it.len(), 1);
}

#[test]
fn strided_rows() {
    let a = cube();
    let t = a.transpose();
    // one-dimensional with no contiguity: strided iteration
    let line: ArrayRef<i32, R1> = t.at(3).at(1);
    assert_eq!(line.strides(), [12]);
    assert_equal(line.iter().map(|x| x.get()), vec![13, 113]);
    assert_equal(line.iter().rev().map(|x| x.get()), vec![113, 13]);
}

#[test]
fn iterators_compare_by_position() {
    let a = cube();
    let line: ArrayRef<i32, R1> = a.view(view![.., 0, 0]);
    let mut x = line.iter();
    let y = line.iter();
    assert_eq!(x, y);
    x.next();
    assert_ne!(x, y);

    let mut p = a.iter();
    let mut q = a.iter();
    p.next();
    q.next();
    assert_eq!(p, q);
}

#[test]
fn elements_row_major() {
    let a = cube();
    assert_equal(a.elements().map(|x| x.get()), a.as_slice().iter().map(|x| x.get()));

    let t = a.transpose();
    let expected = (0..4)
        .cartesian_product(0..3)
        .cartesian_product(0..2)
        .map(|((k, j), i)| 100 * i + 10 * j + k);
    assert_equal(t.elements().map(|x| x.get()), expected);
    assert_eq!(t.elements().len(), 24);
    assert_eq!(t.elements().rev().next().unwrap().get(), 123);
}

#[test]
fn elements_write() {
    let a: Array<u32, R2, R2> = Array::zeros([2, 3]);
    let t = a.transpose();
    for (i, x) in t.elements().enumerate() {
        x.set(i as u32);
    }
    assert_eq!(a.to_vec(), vec![0, 2, 4, 1, 3, 5]);
}

#[test]
fn empty_axes() {
    let a: Array<f32, R2, R2> = Array::zeros([0, 3]);
    assert_eq!(a.iter().count(), 0);
    assert_eq!(a.elements().count(), 0);
    let b: Array<f32, R2, R2> = Array::zeros([3, 0]);
    assert_eq!(b.iter().count(), 3);
    assert!(b.iter().all(|row| row.is_empty()));
    assert_eq!(b.transpose().elements().count(), 0);
}
