use std::{
    collections::{BTreeMap, HashMap, HashSet},
    error, fmt,
    hash::Hash,
    str::FromStr,
};

use itertools::Itertools;
use log::{debug, info};
use num::{BigUint, One};

use crate::{group::PermutationGroup, utils::factorial};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsoMethod {
    BruteForce,
    ElementOrders,
}

impl IsoMethod {
    pub const ALL: [IsoMethod; 2] = [IsoMethod::BruteForce, IsoMethod::ElementOrders];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BruteForce => "brute_force",
            Self::ElementOrders => "element_orders",
        }
    }
}

impl fmt::Display for IsoMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IsoMethod {
    type Err = IsoSearchError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == tag)
            .ok_or_else(|| IsoSearchError::UnknownMethod(tag.to_string()))
    }
}

/*
Impossible means the cheap invariants already differ and no search was run
a search that ran and found nothing is not an error, it is Ok(None)
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IsoSearchError {
    Impossible,
    UnknownMethod(String),
}

impl fmt::Display for IsoSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Impossible => write!(f, "Isomorphism is not possible"),
            Self::UnknownMethod(tag) => write!(
                f,
                "Invalid method: {}, options are: {}",
                tag,
                IsoMethod::ALL.iter().join(", ")
            ),
        }
    }
}
impl error::Error for IsoSearchError {}

/*
a bijection between the elements of two groups, fixed once found
*/
#[repr(transparent)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Isomorphism<X: Eq + Hash, Y>(HashMap<X, Y>);

impl<X: Eq + Hash, Y> Isomorphism<X, Y> {
    pub fn get(&self, x: &X) -> Option<&Y> {
        self.0.get(x)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&X, &Y)> {
        self.0.iter()
    }
}

pub type IsoSearchResult<A, B> = Result<
    Option<Isomorphism<<A as PermutationGroup>::Element, <B as PermutationGroup>::Element>>,
    IsoSearchError,
>;

fn sorted_element_orders<G: PermutationGroup>(g: &G) -> Vec<usize> {
    g.elements()
        .iter()
        .map(|elt| g.element_order(elt))
        .sorted()
        .collect_vec()
}

/*
necessary but not sufficient
order, degree, the multiset of element orders, commutativity
*/
pub fn is_iso_possible<A, B>(a: &A, b: &B) -> bool
where
    A: PermutationGroup,
    B: PermutationGroup,
{
    if a.order() != b.order() {
        return false;
    }
    if a.degree() != b.degree() {
        return false;
    }
    if sorted_element_orders(a) != sorted_element_orders(b) {
        return false;
    }
    a.is_abelian() == b.is_abelian()
}

/*
f has to be defined on all of a, hit every element of b exactly once
and satisfy f(xy) = f(x)f(y) for every ordered pair
*/
pub fn is_iso<A, B, F>(f: F, a: &A, b: &B) -> bool
where
    A: PermutationGroup,
    B: PermutationGroup,
    F: Fn(&A::Element) -> Option<B::Element>,
{
    let images = match a.elements().iter().map(&f).collect::<Option<Vec<_>>>() {
        Some(images) => images,
        None => return false,
    };

    let f_range: HashSet<&B::Element> = images.iter().collect();
    let b_elements: HashSet<&B::Element> = b.elements().iter().collect();
    if f_range != b_elements {
        return false;
    }
    if f_range.len() != a.elements().len() {
        return false;
    }

    for (x, fx) in a.elements().iter().zip(images.iter()) {
        for (y, fy) in a.elements().iter().zip(images.iter()) {
            if f(&a.compose(x, y)) != Some(b.compose(fx, fy)) {
                return false;
            }
        }
    }
    true
}

fn first_iso<A, B, I>(
    a: &A,
    b: &B,
    domain: &[A::Element],
    codomain_orderings: I,
    method: IsoMethod,
) -> Option<Isomorphism<A::Element, B::Element>>
where
    A: PermutationGroup,
    B: PermutationGroup,
    I: Iterator<Item = Vec<B::Element>>,
{
    let mut examined: usize = 0;
    for ordering in codomain_orderings {
        examined += 1;
        let candidate: HashMap<A::Element, B::Element> =
            domain.iter().cloned().zip(ordering).collect();
        if is_iso(|x| candidate.get(x).cloned(), a, b) {
            debug!("{} accepted candidate number {}", method, examined);
            return Some(Isomorphism(candidate));
        }
    }
    debug!("{} exhausted all {} candidates", method, examined);
    None
}

/*
pair a fixed listing of a with every ordering of the elements of b
*/
pub fn find_iso_by_brute_force<A, B>(
    a: &A,
    b: &B,
) -> Option<Isomorphism<A::Element, B::Element>>
where
    A: PermutationGroup,
    B: PermutationGroup,
{
    let a_elements = a.elements();
    let b_elements = b.elements();
    if a_elements.len() != b_elements.len() {
        debug!(
            "No bijection between {} and {} elements",
            a_elements.len(),
            b_elements.len()
        );
        return None;
    }
    debug!(
        "{} over {} candidates",
        IsoMethod::BruteForce,
        factorial(b_elements.len())
    );
    let orderings = b_elements.iter().cloned().permutations(b_elements.len());
    first_iso(a, b, a_elements, orderings, IsoMethod::BruteForce)
}

fn order_classes<G: PermutationGroup>(g: &G) -> BTreeMap<usize, Vec<G::Element>> {
    let mut classes: BTreeMap<usize, Vec<G::Element>> = BTreeMap::new();
    for elt in g.elements() {
        classes
            .entry(g.element_order(elt))
            .or_default()
            .push(elt.clone());
    }
    classes
}

/*
a homomorphism preserves element orders, so only bijections which send
each order class of a onto the order class of b with the same order are tried
the classes are visited in increasing order both when listing a and when
concatenating the choices for b so the zip lines them up
*/
pub fn find_iso_by_element_orders<A, B>(
    a: &A,
    b: &B,
) -> Option<Isomorphism<A::Element, B::Element>>
where
    A: PermutationGroup,
    B: PermutationGroup,
{
    let a_classes = order_classes(a);
    let b_classes = order_classes(b);
    let classes_line_up = a_classes.len() == b_classes.len()
        && a_classes
            .iter()
            .zip(b_classes.iter())
            .all(|((a_order, a_class), (b_order, b_class))| {
                a_order == b_order && a_class.len() == b_class.len()
            });
    if !classes_line_up {
        debug!("Element order classes differ, no order preserving bijection");
        return None;
    }

    let domain = a_classes.values().flatten().cloned().collect_vec();
    let candidate_count = b_classes
        .values()
        .fold(BigUint::one(), |acc, class| acc * factorial(class.len()));
    debug!(
        "{} over {} candidates from classes {:?}",
        IsoMethod::ElementOrders,
        candidate_count,
        b_classes
            .iter()
            .map(|(order, class)| (*order, class.len()))
            .collect_vec()
    );

    let orderings = b_classes
        .values()
        .map(|class| class.iter().cloned().permutations(class.len()))
        .multi_cartesian_product()
        .map(|per_class| per_class.into_iter().flatten().collect_vec());
    first_iso(a, b, &domain, orderings, IsoMethod::ElementOrders)
}

pub fn find_iso<A, B>(a: &A, b: &B, method: IsoMethod) -> IsoSearchResult<A, B>
where
    A: PermutationGroup,
    B: PermutationGroup,
{
    if !is_iso_possible(a, b) {
        info!("Skipping {} search, the groups cannot be isomorphic", method);
        return Err(IsoSearchError::Impossible);
    }
    let found = match method {
        IsoMethod::BruteForce => find_iso_by_brute_force(a, b),
        IsoMethod::ElementOrders => find_iso_by_element_orders(a, b),
    };
    if found.is_some() {
        info!("{} search found an isomorphism", method);
    } else {
        info!("{} search found no isomorphism", method);
    }
    Ok(found)
}

/*
the tag is resolved before any work is done on the groups
*/
pub fn find_iso_by_name<A, B>(a: &A, b: &B, method: &str) -> IsoSearchResult<A, B>
where
    A: PermutationGroup,
    B: PermutationGroup,
{
    let method: IsoMethod = method.parse()?;
    find_iso(a, b, method)
}

mod test {

    #[test]
    fn method_tags() {
        use super::{IsoMethod, IsoSearchError};
        assert_eq!(IsoMethod::BruteForce.to_string(), "brute_force");
        assert_eq!(IsoMethod::ElementOrders.to_string(), "element_orders");
        for method in IsoMethod::ALL {
            assert_eq!(method.as_str().parse::<IsoMethod>(), Ok(method));
        }
        let unknown = "simulated_annealing".parse::<IsoMethod>();
        assert_eq!(
            unknown,
            Err(IsoSearchError::UnknownMethod(
                "simulated_annealing".to_string()
            ))
        );
        assert_eq!(
            IsoSearchError::UnknownMethod("x".to_string()).to_string(),
            "Invalid method: x, options are: brute_force, element_orders"
        );
    }

    #[test]
    fn possible_symmetric_dihedral() {
        use super::is_iso_possible;
        use crate::group::GeneratedGroup;
        let s3 = GeneratedGroup::symmetric(3);
        assert!(is_iso_possible(&s3, &GeneratedGroup::dihedral(3)));
        assert!(!is_iso_possible(&s3, &GeneratedGroup::dihedral(4)));
        assert!(!is_iso_possible(&s3, &GeneratedGroup::cyclic(6)));
        assert!(!is_iso_possible(
            &GeneratedGroup::cyclic(4),
            &GeneratedGroup::dihedral(2)
        ));
    }

    #[test]
    fn possible_is_symmetric() {
        use super::is_iso_possible;
        use crate::group::GeneratedGroup;
        use crate::young::YoungTableau;
        use crate::young_group::{young_group, YoungGroupConfig};
        let mut groups = vec![];
        for n in 1..5 {
            groups.push(GeneratedGroup::symmetric(n));
            groups.push(GeneratedGroup::dihedral(n));
            groups.push(GeneratedGroup::cyclic(n));
        }
        for text in ["2 + 2", "2 + 1", "3 + 1", "1 + 1 + 1"] {
            let yt = YoungTableau::from_notation(text, false).unwrap();
            groups.push(young_group(&yt, YoungGroupConfig::rows_only()).unwrap());
            groups.push(young_group(&yt, YoungGroupConfig::fused_rows()).unwrap());
        }
        for a in &groups {
            for b in &groups {
                assert_eq!(is_iso_possible(a, b), is_iso_possible(b, a));
            }
            assert!(is_iso_possible(a, a));
        }
    }

    #[test]
    fn is_iso_rejects() {
        use super::is_iso;
        use crate::group::{GeneratedGroup, PermutationGroup};
        use crate::perm::Perm;
        use std::collections::HashMap;
        let s3 = GeneratedGroup::symmetric(3);
        let d3 = GeneratedGroup::dihedral(3);
        let to_identity = |_: &Perm| Some(Perm::identity(3));
        assert!(!is_iso(to_identity, &s3, &d3));
        let nowhere = |_: &Perm| None;
        assert!(!is_iso(nowhere, &s3, &d3));
        assert!(is_iso(|x: &Perm| Some(x.clone()), &s3, &s3));

        let identity = s3.identity();
        let swap = Perm::from_cycle(3, &[0, 1]).unwrap();
        let mut shuffled: HashMap<Perm, Perm> =
            s3.elements().iter().map(|z| (z.clone(), z.clone())).collect();
        shuffled.insert(identity.clone(), swap.clone());
        shuffled.insert(swap, identity);
        assert!(!is_iso(|x| shuffled.get(x).cloned(), &s3, &s3));
    }

    #[test]
    fn strategies_on_s3_d3() {
        use super::{find_iso_by_brute_force, find_iso_by_element_orders, is_iso};
        use crate::group::{GeneratedGroup, PermutationGroup};
        let s3 = GeneratedGroup::symmetric(3);
        let d3 = GeneratedGroup::dihedral(3);
        let brute = find_iso_by_brute_force(&s3, &d3).unwrap();
        assert_eq!(brute.len(), s3.order());
        assert!(is_iso(|x| brute.get(x).cloned(), &s3, &d3));
        let by_orders = find_iso_by_element_orders(&s3, &d3).unwrap();
        assert!(is_iso(|x| by_orders.get(x).cloned(), &s3, &d3));
        for (x, y) in by_orders.iter() {
            assert_eq!(s3.element_order(x), d3.element_order(y));
        }
    }

    #[test]
    fn dispatch_finds() {
        use super::{find_iso, is_iso, IsoMethod};
        use crate::group::GeneratedGroup;
        let s3 = GeneratedGroup::symmetric(3);
        let d3 = GeneratedGroup::dihedral(3);
        for method in IsoMethod::ALL {
            let iso = find_iso(&s3, &d3, method).unwrap().unwrap();
            assert!(is_iso(|x| iso.get(x).cloned(), &s3, &d3));
        }
    }

    #[test]
    fn young_groups_against_dihedral() {
        use super::{find_iso, is_iso, IsoMethod};
        use crate::group::GeneratedGroup;
        use crate::young::YoungTableau;
        use crate::young_group::{young_group, YoungGroupConfig};
        let yt = YoungTableau::from_notation("2 + 2", false).unwrap();

        let fused = young_group(&yt, YoungGroupConfig::fused_rows()).unwrap();
        let d4 = GeneratedGroup::dihedral(4);
        let iso = find_iso(&fused, &d4, IsoMethod::ElementOrders)
            .unwrap()
            .unwrap();
        assert!(is_iso(|x| iso.get(x).cloned(), &fused, &d4));

        let rows_only = young_group(&yt, YoungGroupConfig::rows_only()).unwrap();
        let klein = GeneratedGroup::dihedral(2);
        for method in IsoMethod::ALL {
            let iso = find_iso(&rows_only, &klein, method).unwrap().unwrap();
            assert!(is_iso(|x| iso.get(x).cloned(), &rows_only, &klein));
        }
    }

    #[test]
    fn relabelled_copies() {
        use super::{find_iso, is_iso, IsoMethod};
        use crate::group::{GeneratedGroup, PermutationGroup};
        use crate::perm::Perm;
        use rand::seq::SliceRandom;
        let mut rng = rand::thread_rng();
        for original in [GeneratedGroup::dihedral(4), GeneratedGroup::symmetric(3)] {
            let degree = original.degree();
            let mut images = (0..degree).collect::<Vec<_>>();
            images.shuffle(&mut rng);
            let sigma = Perm::from_images(images).unwrap();
            let conjugated_gens = original
                .generators()
                .iter()
                .map(|g| &(&sigma.inverse() * g) * &sigma)
                .collect::<Vec<_>>();
            let relabelled = GeneratedGroup::new(degree, conjugated_gens).unwrap();
            assert_eq!(relabelled.order(), original.order());
            let iso = find_iso(&original, &relabelled, IsoMethod::ElementOrders)
                .unwrap()
                .unwrap();
            assert!(is_iso(|x| iso.get(x).cloned(), &original, &relabelled));
        }
    }

    #[test]
    fn impossible_for_every_method() {
        use super::{find_iso, find_iso_by_name, IsoMethod, IsoSearchError};
        use crate::group::GeneratedGroup;
        let s3 = GeneratedGroup::symmetric(3);
        let d4 = GeneratedGroup::dihedral(4);
        let c4 = GeneratedGroup::cyclic(4);
        let klein = GeneratedGroup::dihedral(2);
        for method in IsoMethod::ALL {
            assert_eq!(find_iso(&s3, &d4, method), Err(IsoSearchError::Impossible));
            assert_eq!(find_iso(&c4, &klein, method), Err(IsoSearchError::Impossible));
            assert_eq!(
                find_iso_by_name(&s3, &d4, method.as_str()),
                Err(IsoSearchError::Impossible)
            );
        }
    }

    #[test]
    fn unknown_method_before_search() {
        use super::{find_iso_by_name, IsoSearchError};
        use crate::group::GeneratedGroup;
        let s3 = GeneratedGroup::symmetric(3);
        let d4 = GeneratedGroup::dihedral(4);
        assert_eq!(
            find_iso_by_name(&s3, &d4, "hill_climbing"),
            Err(IsoSearchError::UnknownMethod("hill_climbing".to_string()))
        );
        assert!(find_iso_by_name(&s3, &s3, "element_orders")
            .unwrap()
            .is_some());
    }

    #[test]
    fn strategies_not_found() {
        use super::{find_iso_by_brute_force, find_iso_by_element_orders};
        use crate::group::GeneratedGroup;
        let c4 = GeneratedGroup::cyclic(4);
        let klein = GeneratedGroup::dihedral(2);
        assert!(find_iso_by_brute_force(&c4, &klein).is_none());
        assert!(find_iso_by_element_orders(&c4, &klein).is_none());
        assert!(find_iso_by_brute_force(&c4, &GeneratedGroup::symmetric(3)).is_none());
    }

    #[test]
    fn search_ran_and_found_nothing() {
        /*
        the Klein four group reporting the element orders of Z4
        passes every cheap check against Z4 but is still not isomorphic to it
        */
        use super::{find_iso, IsoMethod};
        use crate::group::{GeneratedGroup, PermutationGroup};
        use crate::perm::Perm;

        struct Disguised(GeneratedGroup);

        impl PermutationGroup for Disguised {
            type Element = Perm;

            fn order(&self) -> usize {
                self.0.order()
            }

            fn degree(&self) -> usize {
                self.0.degree()
            }

            fn elements(&self) -> &[Perm] {
                self.0.elements()
            }

            fn is_abelian(&self) -> bool {
                self.0.is_abelian()
            }

            fn element_order(&self, elt: &Perm) -> usize {
                let position = self.0.elements().iter().position(|z| z == elt);
                match position {
                    Some(0) => 1,
                    Some(1) => 2,
                    _ => 4,
                }
            }

            fn compose(&self, lhs: &Perm, rhs: &Perm) -> Perm {
                self.0.compose(lhs, rhs)
            }
        }

        let c4 = GeneratedGroup::cyclic(4);
        let disguised = Disguised(GeneratedGroup::dihedral(2));
        assert!(disguised.elements()[0].is_identity());
        for method in IsoMethod::ALL {
            assert_eq!(find_iso(&c4, &disguised, method), Ok(None));
        }
    }
}
