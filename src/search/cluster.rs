use itertools::Itertools;

/// Collapses every connected group of overlapping half-open ranges into one item.
///
/// Items are swept in order of their start; an item joins the current group when
/// it starts before the furthest end seen in that group, which yields exactly the
/// connected components of the interval-overlap graph. Each group is folded with
/// `merge` starting from its first member in input order, and groups are returned
/// ordered by their leftmost start.
pub fn reduce_overlapping<T, R, M>(items: Vec<T>, range: R, mut merge: M) -> Vec<T>
where
    R: Fn(&T) -> (usize, usize),
    M: FnMut(&mut T, &T),
{
    if items.len() <= 1 {
        return items;
    }

    let order = (0..items.len())
        .sorted_by_key(|&index| (range(&items[index]).0, index))
        .collect_vec();

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut reach = 0;
    for index in order {
        let (begin, end) = range(&items[index]);
        match groups.last_mut() {
            Some(group) if begin < reach => {
                group.push(index);
                reach = reach.max(end);
            }
            _ => {
                groups.push(vec![index]);
                reach = end;
            }
        }
    }

    let mut slots = items.into_iter().map(Some).collect_vec();
    let mut reduced = Vec::with_capacity(groups.len());
    for mut group in groups {
        group.sort_unstable();
        let mut members = group.into_iter().filter_map(|index| slots[index].take());
        if let Some(mut representative) = members.next() {
            for member in members {
                merge(&mut representative, &member);
            }
            reduced.push(representative);
        }
    }
    reduced
}
