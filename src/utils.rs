use num::{BigUint, One};

pub fn represents_id(arr: &[usize]) -> bool {
    let mut is_arr_id = true;
    for (arr_idx, tgt_idx) in arr.iter().enumerate() {
        if arr_idx != *tgt_idx {
            is_arr_id = false;
            break;
        }
    }
    is_arr_id
}

pub fn is_non_increasing<T: Ord, I>(mut my_iter: I, prev_elt: Option<T>) -> bool
where
    I: Iterator<Item = T>,
{
    let current = my_iter.next();
    if let Some(real_current) = current {
        if let Some(real_prev_elt) = prev_elt {
            if real_prev_elt < real_current {
                return false;
            }
        }
        is_non_increasing(my_iter, Some(real_current))
    } else {
        true
    }
}

pub fn factorial(n: usize) -> BigUint {
    (1..=n).fold(BigUint::one(), |acc, k| acc * BigUint::from(k))
}

mod test {

    #[test]
    fn identity_arrays() {
        use super::represents_id;
        assert!(represents_id(&[]));
        assert!(represents_id(&[0, 1, 2]));
        assert!(!represents_id(&[1, 0, 2]));
        assert!(!represents_id(&[0, 2, 1]));
    }

    #[test]
    fn non_increasing() {
        use super::is_non_increasing;
        let mut cur_test: Vec<usize> = vec![];
        assert!(is_non_increasing(cur_test.iter(), None));
        cur_test = vec![1];
        assert!(is_non_increasing(cur_test.iter(), None));
        cur_test = vec![5, 3, 3, 1];
        assert!(is_non_increasing(cur_test.iter(), None));
        cur_test = vec![5, 4, 3, 2, 3];
        assert!(!is_non_increasing(cur_test.iter(), None));
        cur_test = vec![1, 2];
        assert!(!is_non_increasing(cur_test.iter(), None));
        cur_test = vec![10, 9];
        assert!(is_non_increasing(cur_test.iter(), None));
    }

    #[test]
    fn factorials() {
        use super::factorial;
        use num::BigUint;
        assert_eq!(factorial(0), BigUint::from(1u32));
        assert_eq!(factorial(1), BigUint::from(1u32));
        assert_eq!(factorial(5), BigUint::from(120u32));
        assert_eq!(factorial(9), BigUint::from(362_880u32));
    }
}
