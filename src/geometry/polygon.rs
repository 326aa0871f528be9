use glam::Vec2;

/// Check if a point is inside a closed ring using ray casting
///
/// The last vertex connects back to the first. Casts a ray from the point
/// towards +x and counts edge crossings; an odd count means inside. Each
/// edge is half-open in y, so a vertex shared by two edges is counted once
/// and horizontal edges never count.
pub fn point_in_ring(point: Vec2, ring: &[Vec2]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = ring.len();

    let mut j = n - 1;
    for i in 0..n {
        let pi = ring[i];
        let pj = ring[j];

        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }

        j = i;
    }

    inside
}
