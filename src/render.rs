pub(crate) mod composite;
pub(crate) mod compositor;
pub(crate) mod cpu;
pub(crate) mod options;
pub(crate) mod overlay;
pub(crate) mod photo;
pub(crate) mod pipeline;
pub(crate) mod surface;
pub(crate) mod watermark;
