use std::{error, fmt, ops::Mul};

use itertools::Itertools;
use num::integer::lcm;
use permutations::Permutation;

use crate::utils::represents_id;

/*
a permutation of 0..degree stored as its images
composition is left to right, (a * b)(i) = b(a(i))
so a * b means do a and then b
the images are kept here rather than in a permutations::Permutation
because group elements are hashed and sorted, which that type does not allow
*/
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Perm {
    images: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupError {
    NotAPermutation(Vec<usize>),
    DegreeMismatch { expected: usize, found: usize },
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAPermutation(images) => {
                write!(f, "{:?} does not describe a permutation", images)
            }
            Self::DegreeMismatch { expected, found } => write!(
                f,
                "Permutation of degree {} where degree {} was expected",
                found, expected
            ),
        }
    }
}
impl error::Error for GroupError {}

impl Perm {
    pub fn identity(degree: usize) -> Self {
        Self {
            images: (0..degree).collect(),
        }
    }

    pub fn from_images(images: Vec<usize>) -> Result<Self, GroupError> {
        let degree = images.len();
        let mut seen = vec![false; degree];
        for image in &images {
            if *image >= degree || seen[*image] {
                return Err(GroupError::NotAPermutation(images));
            }
            seen[*image] = true;
        }
        Ok(Self { images })
    }

    /*
    the cycle cycle[0] -> cycle[1] -> ... -> cycle[0] on 0..degree
    */
    pub fn from_cycle(degree: usize, cycle: &[usize]) -> Result<Self, GroupError> {
        let mut images = (0..degree).collect_vec();
        if !cycle.iter().all_unique() || cycle.iter().any(|z| *z >= degree) {
            return Err(GroupError::NotAPermutation(cycle.to_vec()));
        }
        for (src, tgt) in cycle.iter().circular_tuple_windows() {
            images[*src] = *tgt;
        }
        Ok(Self { images })
    }

    pub fn from_permutation(p: &Permutation, degree: usize) -> Result<Self, GroupError> {
        Self::from_images((0..degree).map(|i| p.apply(i)).collect())
    }

    pub fn to_permutation(&self) -> Result<Permutation, GroupError> {
        Permutation::try_from(self.images.clone())
            .map_err(|_| GroupError::NotAPermutation(self.images.clone()))
    }

    pub fn degree(&self) -> usize {
        self.images.len()
    }

    pub fn images(&self) -> &[usize] {
        &self.images
    }

    pub fn apply(&self, point: usize) -> usize {
        self.images[point]
    }

    pub fn is_identity(&self) -> bool {
        represents_id(&self.images)
    }

    pub fn inverse(&self) -> Self {
        let mut images = vec![0; self.images.len()];
        for (src, tgt) in self.images.iter().enumerate() {
            images[*tgt] = src;
        }
        Self { images }
    }

    pub fn compose(&self, then: &Self) -> Self {
        assert_eq!(
            self.degree(),
            then.degree(),
            "Only permutations of the same degree can be composed"
        );
        Self {
            images: self.images.iter().map(|z| then.images[*z]).collect(),
        }
    }

    /*
    the cycles of length at least 2, each starting from its smallest point
    */
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.images.len()];
        let mut answer = vec![];
        for start in 0..self.images.len() {
            if visited[start] {
                continue;
            }
            let mut cycle = vec![start];
            visited[start] = true;
            let mut current = self.images[start];
            while current != start {
                visited[current] = true;
                cycle.push(current);
                current = self.images[current];
            }
            if cycle.len() > 1 {
                answer.push(cycle);
            }
        }
        answer
    }

    pub fn order(&self) -> usize {
        self.cycles().iter().fold(1, |acc, cycle| lcm(acc, cycle.len()))
    }
}

impl Mul for Perm {
    type Output = Perm;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl<'a> Mul<&'a Perm> for &'a Perm {
    type Output = Perm;

    fn mul(self, rhs: &'a Perm) -> Self::Output {
        self.compose(rhs)
    }
}

impl fmt::Display for Perm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cycles = self.cycles();
        if cycles.is_empty() {
            return write!(f, "()");
        }
        for cycle in cycles {
            write!(f, "({})", cycle.iter().join(" "))?;
        }
        Ok(())
    }
}

mod test {

    #[test]
    fn construction() {
        use super::{GroupError, Perm};
        assert!(Perm::identity(4).is_identity());
        assert!(Perm::from_images(vec![1, 0, 2]).is_ok());
        assert_eq!(
            Perm::from_images(vec![1, 1, 2]),
            Err(GroupError::NotAPermutation(vec![1, 1, 2]))
        );
        assert_eq!(
            Perm::from_images(vec![0, 3]),
            Err(GroupError::NotAPermutation(vec![0, 3]))
        );
        let three_cycle = Perm::from_cycle(4, &[0, 2, 3]).unwrap();
        assert_eq!(three_cycle.images(), &[2, 1, 3, 0]);
        assert!(Perm::from_cycle(4, &[0, 4]).is_err());
        assert!(Perm::from_cycle(4, &[1, 2, 1]).is_err());
    }

    #[test]
    fn composition_order() {
        use super::Perm;
        let a = Perm::from_cycle(3, &[0, 1]).unwrap();
        let b = Perm::from_cycle(3, &[1, 2]).unwrap();
        let ab = &a * &b;
        assert_eq!(ab.apply(0), b.apply(a.apply(0)));
        assert_eq!(ab.apply(1), b.apply(a.apply(1)));
        assert_eq!(ab.apply(2), b.apply(a.apply(2)));
        assert_ne!(ab, &b * &a);
        assert_eq!(ab.order(), 3);
        assert!((&ab * &ab.inverse()).is_identity());
        assert_eq!(a.clone() * a.clone(), Perm::identity(3));
    }

    #[test]
    fn cycles_and_orders() {
        use super::Perm;
        let p = Perm::from_images(vec![1, 2, 0, 4, 3, 5]).unwrap();
        assert_eq!(p.cycles(), vec![vec![0, 1, 2], vec![3, 4]]);
        assert_eq!(p.order(), 6);
        assert_eq!(p.to_string(), "(0 1 2)(3 4)");
        assert_eq!(Perm::identity(5).to_string(), "()");
        assert_eq!(Perm::identity(5).order(), 1);
        assert_eq!(Perm::identity(0).order(), 1);
    }

    #[test]
    fn permutations_interop() {
        use super::Perm;
        use permutations::Permutation;
        let swap = Permutation::transposition(5, 1, 3);
        let as_perm = Perm::from_permutation(&swap, 5).unwrap();
        assert_eq!(as_perm.images(), &[0, 3, 2, 1, 4]);
        let back = as_perm.to_permutation().unwrap();
        assert_eq!(back, swap);
    }
}
