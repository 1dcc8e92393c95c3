pub(crate) mod blur;
pub(crate) mod mask;
