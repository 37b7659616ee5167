use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Orders nodes so that each one comes after everything it depends on.
///
/// `deps[i]` lists the indices node `i` depends on. Nodes whose dependencies are satisfied at
/// the same time leave in index order, which makes the result deterministic. On failure the
/// indices of the nodes sitting on a cycle are returned in ascending order; nodes that merely
/// depend on a cycle are left out.
pub(crate) fn dependency_order(deps: &[Vec<usize>]) -> Result<Vec<usize>, Vec<usize>> {
    let n = deps.len();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_degree = vec![0usize; n];
    for (node, node_deps) in deps.iter().enumerate() {
        for &dep in node_deps {
            dependents[dep].push(node);
            in_degree[node] += 1;
        }
    }

    let mut queue: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &deg)| deg == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    let mut sorted = Vec::with_capacity(n);
    while let Some(Reverse(node)) = queue.pop() {
        sorted.push(node);
        for &next in &dependents[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push(Reverse(next));
            }
        }
    }

    if sorted.len() == n {
        return Ok(sorted);
    }

    let mut remaining: Vec<bool> = in_degree.iter().map(|&deg| deg > 0).collect();
    // Peel off nodes nothing remaining depends on; what is left lies on a cycle.
    loop {
        let peel: Vec<usize> = (0..n)
            .filter(|&i| remaining[i] && !dependents[i].iter().any(|&d| remaining[d]))
            .collect();
        if peel.is_empty() {
            break;
        }
        for i in peel {
            remaining[i] = false;
        }
    }
    Err((0..n).filter(|&i| remaining[i]).collect())
}
