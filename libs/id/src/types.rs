//! Identifier definitions for managed resources.

use crate::define_id;

define_id!(IsoFileId, "iso");
