use crate::types::Point;

/// Indre vinkel i pivot-leddet `b`, gitt naboleddene `a` og `c`.
/// Standard to-vektors atan2-differanse; verdier over 180° speiles
/// (360 − v) slik at resultatet alltid ligger i [0, 180].
pub fn joint_angle_deg(a: Point, b: Point, c: Point) -> f64 {
    let rad = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let mut deg = rad.to_degrees().abs();
    if deg > 180.0 {
        deg = 360.0 - deg;
    }
    deg
}
