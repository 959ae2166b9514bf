use std::{
    collections::{HashMap, HashSet, VecDeque},
    fmt::Debug,
    hash::Hash,
};

use itertools::Itertools;
use log::debug;
use union_find::{QuickUnionUf, UnionBySize, UnionFind};

use crate::perm::{GroupError, Perm};

/*
the queries the isomorphism search needs from a finite permutation group
nothing here says how elements are stored
*/
pub trait PermutationGroup {
    type Element: Clone + Eq + Hash + Debug;

    fn order(&self) -> usize;
    fn degree(&self) -> usize;
    fn elements(&self) -> &[Self::Element];
    fn is_abelian(&self) -> bool;
    fn element_order(&self, elt: &Self::Element) -> usize;
    fn compose(&self, lhs: &Self::Element, rhs: &Self::Element) -> Self::Element;
}

/*
the subgroup of Sym(0..degree) generated by generators
all elements are found up front by closing under right multiplication
so only use this for groups small enough to list
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedGroup {
    degree: usize,
    generators: Vec<Perm>,
    elements: Vec<Perm>,
}

impl GeneratedGroup {
    pub fn new(degree: usize, generators: Vec<Perm>) -> Result<Self, GroupError> {
        if let Some(bad) = generators.iter().find(|g| g.degree() != degree) {
            return Err(GroupError::DegreeMismatch {
                expected: degree,
                found: bad.degree(),
            });
        }
        let identity = Perm::identity(degree);
        let mut seen = HashSet::from([identity.clone()]);
        let mut to_visit = VecDeque::from([identity]);
        while let Some(current) = to_visit.pop_front() {
            for gen in &generators {
                let next = &current * gen;
                if !seen.contains(&next) {
                    seen.insert(next.clone());
                    to_visit.push_back(next);
                }
            }
        }
        let elements = seen.into_iter().sorted().collect_vec();
        debug!(
            "Closed {} generators of degree {} into {} elements",
            generators.len(),
            degree,
            elements.len()
        );
        Ok(Self {
            degree,
            generators,
            elements,
        })
    }

    pub fn symmetric(n: usize) -> Self {
        let mut generators = vec![];
        if n >= 2 {
            generators.push(Self::cycle_on(n, &[0, 1]));
        }
        if n >= 3 {
            generators.push(Self::cycle_on(n, &(0..n).collect_vec()));
        }
        Self::from_valid_generators(n, generators)
    }

    /*
    the symmetries of a regular n-gon, order 2n
    n = 1 and n = 2 are realized on 2 and 4 points like the usual small cases
    */
    pub fn dihedral(n: usize) -> Self {
        match n {
            0 => Self::from_valid_generators(0, vec![]),
            1 => Self::from_valid_generators(2, vec![Self::cycle_on(2, &[0, 1])]),
            2 => {
                let a = &Self::cycle_on(4, &[0, 1]) * &Self::cycle_on(4, &[2, 3]);
                let b = &Self::cycle_on(4, &[0, 2]) * &Self::cycle_on(4, &[1, 3]);
                Self::from_valid_generators(4, vec![a, b])
            }
            _ => {
                let rotation = Self::cycle_on(n, &(0..n).collect_vec());
                let reflection = match Perm::from_images((0..n).rev().collect()) {
                    Ok(reflection) => reflection,
                    Err(e) => unreachable!("reversal is a permutation: {}", e),
                };
                Self::from_valid_generators(n, vec![rotation, reflection])
            }
        }
    }

    pub fn cyclic(n: usize) -> Self {
        let generators = if n >= 2 {
            vec![Self::cycle_on(n, &(0..n).collect_vec())]
        } else {
            vec![]
        };
        Self::from_valid_generators(n, generators)
    }

    fn cycle_on(degree: usize, cycle: &[usize]) -> Perm {
        match Perm::from_cycle(degree, cycle) {
            Ok(perm) => perm,
            Err(e) => unreachable!("named group cycles stay inside the degree: {}", e),
        }
    }

    fn from_valid_generators(degree: usize, generators: Vec<Perm>) -> Self {
        match Self::new(degree, generators) {
            Ok(group) => group,
            Err(e) => unreachable!("named group generators have the right degree: {}", e),
        }
    }

    pub fn generators(&self) -> &[Perm] {
        &self.generators
    }

    pub fn contains(&self, elt: &Perm) -> bool {
        self.elements.binary_search(elt).is_ok()
    }

    pub fn identity(&self) -> Perm {
        Perm::identity(self.degree)
    }

    /*
    the orbits of 0..degree, each sorted, listed by smallest point
    */
    pub fn orbits(&self) -> Vec<Vec<usize>> {
        let mut uf = QuickUnionUf::<UnionBySize>::new(self.degree);
        for gen in &self.generators {
            for (src, tgt) in gen.images().iter().enumerate() {
                uf.union(src, *tgt);
            }
        }
        let mut set_to_orbit_num: HashMap<usize, usize> = HashMap::new();
        let mut orbits: Vec<Vec<usize>> = vec![];
        for point in 0..self.degree {
            let which_set = uf.find(point);
            if let Some(z) = set_to_orbit_num.get(&which_set) {
                orbits[*z].push(point);
            } else {
                set_to_orbit_num.insert(which_set, orbits.len());
                orbits.push(vec![point]);
            }
        }
        orbits
    }

    pub fn is_transitive(&self) -> bool {
        self.orbits().len() <= 1
    }
}

impl PermutationGroup for GeneratedGroup {
    type Element = Perm;

    fn order(&self) -> usize {
        self.elements.len()
    }

    fn degree(&self) -> usize {
        self.degree
    }

    fn elements(&self) -> &[Perm] {
        &self.elements
    }

    fn is_abelian(&self) -> bool {
        self.generators
            .iter()
            .tuple_combinations()
            .all(|(g, h)| g * h == h * g)
    }

    fn element_order(&self, elt: &Perm) -> usize {
        elt.order()
    }

    fn compose(&self, lhs: &Perm, rhs: &Perm) -> Perm {
        lhs * rhs
    }
}

mod test {

    #[test]
    fn named_orders() {
        use super::{GeneratedGroup, PermutationGroup};
        for n in 0..6 {
            let expected: usize = (1..=n).product();
            assert_eq!(GeneratedGroup::symmetric(n).order(), expected, "S{}", n);
            assert_eq!(GeneratedGroup::cyclic(n).order(), n.max(1), "C{}", n);
        }
        for n in 1..7 {
            assert_eq!(GeneratedGroup::dihedral(n).order(), 2 * n, "D{}", n);
        }
        assert_eq!(GeneratedGroup::dihedral(3).degree(), 3);
        assert_eq!(GeneratedGroup::dihedral(2).degree(), 4);
        assert_eq!(GeneratedGroup::symmetric(4).degree(), 4);
    }

    #[test]
    fn named_generators_are_not_trivial() {
        use super::GeneratedGroup;
        for n in 1..7 {
            let dihedral = GeneratedGroup::dihedral(n);
            assert!(dihedral.generators().iter().all(|g| !g.is_identity()), "D{}", n);
        }
        for n in 2..7 {
            let cyclic = GeneratedGroup::cyclic(n);
            assert_eq!(cyclic.generators()[0].order(), n, "C{}", n);
            let symmetric = GeneratedGroup::symmetric(n);
            assert!(symmetric.generators().iter().all(|g| !g.is_identity()), "S{}", n);
        }
    }

    #[test]
    fn abelian() {
        use super::{GeneratedGroup, PermutationGroup};
        assert!(GeneratedGroup::cyclic(5).is_abelian());
        assert!(GeneratedGroup::dihedral(2).is_abelian());
        assert!(GeneratedGroup::symmetric(2).is_abelian());
        assert!(!GeneratedGroup::symmetric(3).is_abelian());
        assert!(!GeneratedGroup::dihedral(4).is_abelian());
    }

    #[test]
    fn closure_is_a_group() {
        use super::{GeneratedGroup, PermutationGroup};
        let d4 = GeneratedGroup::dihedral(4);
        assert!(d4.contains(&d4.identity()));
        for a in d4.elements() {
            assert!(d4.contains(&a.inverse()));
            for b in d4.elements() {
                assert!(d4.contains(&d4.compose(a, b)));
            }
        }
        let mut orders = d4
            .elements()
            .iter()
            .map(|z| d4.element_order(z))
            .collect::<Vec<_>>();
        orders.sort();
        assert_eq!(orders, vec![1, 2, 2, 2, 2, 2, 4, 4]);
    }

    #[test]
    fn degree_mismatch() {
        use super::GeneratedGroup;
        use crate::perm::{GroupError, Perm};
        let gens = vec![Perm::identity(3), Perm::identity(4)];
        assert_eq!(
            GeneratedGroup::new(3, gens),
            Err(GroupError::DegreeMismatch {
                expected: 3,
                found: 4
            })
        );
    }

    #[test]
    fn trivial_group() {
        use super::{GeneratedGroup, PermutationGroup};
        let trivial = GeneratedGroup::new(4, vec![]).unwrap();
        assert_eq!(trivial.order(), 1);
        assert_eq!(trivial.degree(), 4);
        assert!(trivial.is_abelian());
        assert_eq!(trivial.orbits(), vec![vec![0], vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn orbits() {
        use super::GeneratedGroup;
        use crate::perm::Perm;
        let gens = vec![
            Perm::from_cycle(6, &[0, 3]).unwrap(),
            Perm::from_cycle(6, &[3, 5]).unwrap(),
            Perm::from_cycle(6, &[1, 2]).unwrap(),
        ];
        let g = GeneratedGroup::new(6, gens).unwrap();
        assert_eq!(g.orbits(), vec![vec![0, 3, 5], vec![1, 2], vec![4]]);
        assert!(!g.is_transitive());
        assert!(GeneratedGroup::dihedral(5).is_transitive());
    }
}
