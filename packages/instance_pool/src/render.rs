/// Combines shared intrinsic state with per-use extrinsic state.
///
/// Implemented by the intrinsic state type of a pool. The receiver is `&self`, so an
/// implementation cannot change the shared instance; everything that varies between uses must
/// arrive through `extrinsic` and leave through the returned output.
///
/// A single intrinsic type may implement `Render` for several extrinsic types.
///
/// # Example
///
/// ```rust
/// use instance_pool::Render;
///
/// struct Tile {
///     glyph: char,
/// }
///
/// struct Repeat(usize);
///
/// impl Render<Repeat> for Tile {
///     type Output = String;
///
///     fn render(&self, extrinsic: &Repeat) -> String {
///         std::iter::repeat_n(self.glyph, extrinsic.0).collect()
///     }
/// }
///
/// let tile = Tile { glyph: '#' };
/// assert_eq!(tile.render(&Repeat(3)), "###");
/// ```
pub trait Render<E: ?Sized> {
    /// What rendering produces.
    type Output;

    /// Renders the shared state with the given extrinsic state.
    fn render(&self, extrinsic: &E) -> Self::Output;
}
