use ndview::prelude::*;

use defmac::defmac;
use itertools::assert_equal;

fn grid() -> Array<i32, R2, R2> {
    Array::from_shape_fn([3, 4], |[i, j]| (10 * i + j) as i32)
}

#[test]
fn assign_from_other_layouts() {
    let a = grid();
    let b: Array<i32, R2, R2> = Array::zeros([4, 3]);
    b.deep().assign(&a.transpose());
    assert_eq!(b, a.transpose());
    assert_equal(b.at(3).to_vec(), vec![3, 13, 23]);

    // the target may itself be strided
    let c: Array<i32, R2, R2> = Array::zeros([3, 4]);
    c.transpose().assign(&b);
    assert_eq!(c, a);
}

#[test]
fn assign_through_views() {
    let a: Array<u8, R2, R2> = Array::zeros([4, 4]);
    let ones: Array<u8, R1, R1> = Array::from_elem([2], 1);
    a.view(view![1..3, 3]).assign(&ones);
    a.at(0).view(view![..;2]).fill(2);
    assert_eq!(
        a.to_vec(),
        vec![2, 0, 2, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0]
    );
}

#[test]
fn fill_and_map() {
    let a: Array<f64, R3, R3> = Array::from_elem([2, 2, 2], 0.5);
    a.at(1).fill(2.0);
    a.deep().map_inplace(|x| x * x);
    assert_eq!(a.to_vec(), vec![0.25, 0.25, 0.25, 0.25, 4.0, 4.0, 4.0, 4.0]);
}

#[test]
fn compound_operators() {
    let a = grid();
    let mut r = a.deep();
    let row: Array<i32, R1, R1> = Array::from(vec![1, 1, 1, 1]);
    let mut first = a.at(0);
    first += &row;
    r *= 2;
    assert_equal(a.at(0).to_vec(), vec![2, 4, 6, 8]);
    assert_equal(a.at(2).to_vec(), vec![40, 42, 44, 46]);

    let mut t = a.transpose();
    t -= &a.transpose();
    assert!(a.elements().all(|x| x.get() == 0));
}

#[test]
fn operators_with_strided_operand() {
    let a: Array<f64, R1, R1> = Array::from_elem([3], 1.0);
    let b: Array<f64, R1> = Array::from_vec_strided([3], [-1], vec![1., 2., 3.]).unwrap();
    let mut r = a.deep();
    defmac!(check v => assert_eq!(a.to_vec(), v));
    r += &b;
    check!(vec![4., 3., 2.]);
    r /= 2.;
    check!(vec![2., 1.5, 1.]);
}

#[test]
#[should_panic]
fn assign_shape_mismatch() {
    let a: Array<i32, R2, R2> = Array::zeros([2, 3]);
    let b: Array<i32, R2, R2> = Array::zeros([3, 2]);
    a.deep().assign(&b);
}

#[test]
#[should_panic]
fn operator_shape_mismatch() {
    let a = grid();
    let mut r = a.deep();
    r %= &a.transpose();
}
