//! Input parameters for the mutation endpoints.

mod vni;
pub use vni::*;

mod work_order;
pub use work_order::*;
