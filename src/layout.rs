//! Flash layout for the merged full-flash image.
//!
//! The offsets and chip name are toolchain data, not code: esptool's
//! `merge-bin` places each component binary at the offset the ESP32 boot ROM
//! and second-stage bootloader expect. Other chip variants use different
//! offsets, so the layout travels with the export context instead of being
//! baked into the exporter.

use std::path::Path;

/// Where each component binary lands in the merged image.
#[derive(Debug, Clone)]
pub struct FlashLayout {
    /// Chip target passed to esptool (`--chip <name>`).
    pub chip: String,
    /// Second-stage bootloader offset.
    pub bootloader: u32,
    /// Partition table offset.
    pub partitions: u32,
    /// OTA boot-selector stub offset.
    pub boot_app0: u32,
    /// Application image offset.
    pub app: u32,
}

impl FlashLayout {
    /// Layout for classic ESP32 chips (4MB default partition scheme).
    pub fn esp32() -> Self {
        Self {
            chip: "esp32".to_string(),
            bootloader: 0x1000,
            partitions: 0x8000,
            boot_app0: 0xe000,
            app: 0x10000,
        }
    }

    /// Build the ordered `<offset> <file>` argument pairs for `merge-bin`.
    ///
    /// Order matters: esptool writes components in argument order, and the
    /// launcher ecosystem expects bootloader, partition table, boot-selector
    /// stub, then application.
    pub fn merge_args(
        &self,
        bootloader: &Path,
        partitions: &Path,
        boot_app0: &Path,
        app: &Path,
    ) -> Vec<String> {
        let pairs = [
            (self.bootloader, bootloader),
            (self.partitions, partitions),
            (self.boot_app0, boot_app0),
            (self.app, app),
        ];

        let mut args = Vec::with_capacity(pairs.len() * 2);
        for (offset, path) in pairs {
            args.push(format!("{:#x}", offset));
            args.push(path.to_string_lossy().into_owned());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_esp32_offsets() {
        let layout = FlashLayout::esp32();
        assert_eq!(layout.chip, "esp32");
        assert_eq!(layout.bootloader, 0x1000);
        assert_eq!(layout.partitions, 0x8000);
        assert_eq!(layout.boot_app0, 0xe000);
        assert_eq!(layout.app, 0x10000);
    }

    #[test]
    fn test_merge_args_order_and_format() {
        let layout = FlashLayout::esp32();
        let args = layout.merge_args(
            &PathBuf::from("/b/bootloader.bin"),
            &PathBuf::from("/b/partitions.bin"),
            &PathBuf::from("/p/boot_app0.bin"),
            &PathBuf::from("/b/firmware.bin"),
        );

        assert_eq!(
            args,
            vec![
                "0x1000",
                "/b/bootloader.bin",
                "0x8000",
                "/b/partitions.bin",
                "0xe000",
                "/p/boot_app0.bin",
                "0x10000",
                "/b/firmware.bin",
            ]
        );
    }
}
