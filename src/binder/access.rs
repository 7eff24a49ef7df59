//! Access level mapping from raw member attributes.
//!
//! The mask covers eight values and the tables below must stay exhaustive.
//! An unassigned value aborts the build rather than degrading, since it
//! means the mapping itself has a gap.

use crate::graph::Access;
use crate::metadata::{FieldAccessFlags, MethodAccessFlags, FIELD_ACCESS_MASK, METHOD_ACCESS_MASK};
use crate::{Error, Result};

/// Map method attribute flags onto an access level.
///
/// Family access maps to [`Access::Protected`], the two family-and-unit
/// combinations fold into [`Access::Internal`].
///
/// # Errors
/// Returns [`Error::UnmappedAccessMask`] for a mask value outside the
/// assigned range.
pub(crate) fn access_from_method_flags(flags: u32) -> Result<Access> {
    let access = MethodAccessFlags::from_method_flags(flags);
    if access == MethodAccessFlags::COMPILER_CONTROLLED || access == MethodAccessFlags::PRIVATE {
        Ok(Access::Private)
    } else if access == MethodAccessFlags::FAM_AND_ASSEM
        || access == MethodAccessFlags::ASSEM
        || access == MethodAccessFlags::FAM_OR_ASSEM
    {
        Ok(Access::Internal)
    } else if access == MethodAccessFlags::FAMILY {
        Ok(Access::Protected)
    } else if access == MethodAccessFlags::PUBLIC {
        Ok(Access::Public)
    } else {
        Err(Error::UnmappedAccessMask(flags & METHOD_ACCESS_MASK))
    }
}

/// Map field attribute flags onto an access level.
///
/// # Errors
/// Returns [`Error::UnmappedAccessMask`] for a mask value outside the
/// assigned range.
pub(crate) fn access_from_field_flags(flags: u32) -> Result<Access> {
    let access = FieldAccessFlags::from_field_flags(flags);
    if access == FieldAccessFlags::COMPILER_CONTROLLED || access == FieldAccessFlags::PRIVATE {
        Ok(Access::Private)
    } else if access == FieldAccessFlags::FAM_AND_ASSEM
        || access == FieldAccessFlags::ASSEM
        || access == FieldAccessFlags::FAM_OR_ASSEM
    {
        Ok(Access::Internal)
    } else if access == FieldAccessFlags::FAMILY {
        Ok(Access::Protected)
    } else if access == FieldAccessFlags::PUBLIC {
        Ok(Access::Public)
    } else {
        Err(Error::UnmappedAccessMask(flags & FIELD_ACCESS_MASK))
    }
}
