// src/data/eventflags.rs

//! Decode an FSEvents event-flag mask into symbolic names.
//!
//! The mask is the last four bytes of a record trailer, stored big-endian.
//! Each set bit maps to one name from [`EVENT_FLAGS`]. Names are emitted in
//! ascending bit order, each terminated by `;`, e.g. mask `0x11000000`
//! decodes to `"ItemCreated;ItemModified;"`.

/// An event-flag mask, already converted to host order.
pub type EventMask = u32;

/// Every known event flag bit and its name, in ascending bit order.
///
/// The order of this table is the order of names in a decoded string.
pub const EVENT_FLAGS: [(EventMask, &str); 23] = [
    (0x0000_0001, "MustScanSubDirs"),
    (0x0000_0002, "UserDropped"),
    (0x0000_0004, "KernelDropped"),
    (0x0000_0008, "EventIdsWrapped"),
    (0x0000_0010, "HistoryDone"),
    (0x0000_0020, "RootChanged"),
    (0x0000_0040, "Mount"),
    (0x0000_0080, "Unmount"),
    (0x0000_1000, "UseCFTypes"),
    (0x0000_2000, "NoDefer"),
    (0x0000_4000, "WatchRoot"),
    (0x0000_8000, "IgnoreSelf"),
    (0x0001_0000, "ItemIsFile"),
    (0x0002_0000, "ItemIsDir"),
    (0x0004_0000, "ItemIsSymlink"),
    (0x0100_0000, "ItemCreated"),
    (0x0200_0000, "ItemRemoved"),
    (0x0400_0000, "ItemInodeMetaMod"),
    (0x0800_0000, "ItemRenamed"),
    (0x1000_0000, "ItemModified"),
    (0x2000_0000, "ItemFinderInfoMod"),
    (0x4000_0000, "ItemChangeOwner"),
    (0x8000_0000, "ItemXattrMod"),
];

/// Separator written after every decoded flag name.
pub const FLAG_TERMINATOR: char = ';';

/// Decode `mask` to the `;`-terminated names of each set bit.
///
/// Bits without a name are ignored. A zero mask decodes to an empty
/// `String`.
pub fn mask_to_names(mask: EventMask) -> String {
    let mut names: String = String::with_capacity(32);
    for (bit, name) in EVENT_FLAGS.iter() {
        if bit & mask != 0 {
            names.push_str(name);
            names.push(FLAG_TERMINATOR);
        }
    }

    names
}

/// Render `mask` as the record's raw mask hex form, e.g. `"0x01000000"`.
///
/// The digits are the trailer bytes in file order (big-endian).
pub fn mask_to_hex(mask: EventMask) -> String {
    format!("0x{:08x}", mask)
}
