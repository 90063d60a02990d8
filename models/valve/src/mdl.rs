use bitflags::bitflags;

use ultraviolet::vec::Vec3;

use sik_core::{
	cursor::Cursor,
	rtag4
};

#[cfg(feature = "import")]
use import::MdlImportError;

/// The "IDST" studiomdl identifier, as a little endian u32.
pub const MAGIC: u32 = rtag4!(b"IDST");

/// Oldest studiomdl revision known to carry the layout below.
pub const MIN_VERSION: i32 = 44;

/// Newest studiomdl revision known to carry the layout below.
pub const MAX_VERSION: i32 = 48;

/// Absolute offset of the field block following the section index run.
/// A legacy boundary of the format; fixed, not derivable from other fields.
pub const SECOND_BLOCK: usize = 0x134;

/// Bytes consumed through the second header offset field.
pub const HEADER_SIZE: usize = 0x18C;

/// Size of the optional second header block.
pub const HEADER2_SIZE: usize = 20;

bitflags! {
	pub struct ModelFlags: u32 {
		const AUTO_GENERATED_HITBOX = 1;
		const USES_ENV_CUBEMAP = 1 << 1;
		const FORCE_OPAQUE = 1 << 2;
		const TRANSLUCENT_TWO_PASS = 1 << 3;
		const STATIC_PROP = 1 << 4;
		const USES_FB_TEXTURE = 1 << 5;
		const HAS_SHADOW_LOD = 1 << 6;
		const USES_BUMP_MAPPING = 1 << 7;
		const USES_SHADOW_LOD_MATERIALS = 1 << 8;
		const OBSOLETE = 1 << 9;
		const UNUSED = 1 << 10;
		const NO_FORCED_FADE = 1 << 11;
		const FORCE_PHONEME_CROSSFADE = 1 << 12;
		const CONSTANT_DIRECTIONAL_LIGHT_DOT = 1 << 13;
		const FLEXES_CONVERTED = 1 << 14;
		const BUILT_IN_PREVIEW_MODE = 1 << 15;
		const AMBIENT_BOOST = 1 << 16;
		const DO_NOT_CAST_SHADOWS = 1 << 17;
		const CAST_TEXTURE_SHADOWS = 1 << 18;
	}
}

/// Second header appended by newer studiomdl revisions, reachable only
/// through an absolute offset stored in the main header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Header2 {
	pub src_bone_transform_count: i32,
	pub src_bone_transform_index: i32,
	pub illum_position_attachment_index: i32,
	pub max_eye_deflection: f32,
	pub linear_bone_index: i32,
}

/// The fixed-layout header at the start of an MDL container.
///
/// Every count/index pair points into a later section of the file; the
/// sections themselves are decoded by their own readers.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
	pub magic: u32,
	pub version: i32,
	pub checksum: i32,
	pub name: String,
	pub data_length: i32,

	pub eye_position: Vec3,
	pub illum_position: Vec3,
	pub hull_min: Vec3,
	pub hull_max: Vec3,
	pub view_bb_min: Vec3,
	pub view_bb_max: Vec3,

	pub flags: ModelFlags,

	pub bone_count: i32,
	pub bone_index: i32,
	pub bone_controller_count: i32,
	pub bone_controller_index: i32,
	pub hitbox_count: i32,
	pub hitbox_index: i32,
	pub local_anim_count: i32,
	pub local_anim_index: i32,
	pub local_sequence_count: i32,
	pub local_sequence_index: i32,
	pub activity_list_version: i32,
	pub events_indexed: i32,
	pub texture_count: i32,
	pub texture_index: i32,
	pub texture_dir_count: i32,
	pub texture_dir_index: i32,
	pub skin_reference_count: i32,
	pub skin_family_count: i32,
	pub skin_ref_index: i32,
	pub body_part_count: i32,
	pub body_part_index: i32,
	pub attachment_count: i32,
	pub attachment_index: i32,
	pub local_node_count: i32,
	pub local_node_index: i32,
	pub local_node_name_index: i32,
	pub flex_desc_count: i32,
	pub flex_desc_index: i32,
	pub flex_controller_count: i32,
	pub flex_controller_index: i32,
	pub flex_rules_count: i32,
	pub flex_rules_index: i32,
	pub ik_chain_count: i32,
	pub ik_chain_index: i32,
	pub mouths_count: i32,
	pub mouths_index: i32,
	pub local_pose_param_count: i32,
	pub local_pose_param_index: i32,

	pub surface_prop_index: i32,
	pub key_value_index: i32,
	pub key_value_count: i32,
	pub ik_lock_count: i32,
	pub ik_lock_index: i32,
	pub mass: f32,
	pub contents: i32,
	pub include_model_count: i32,
	pub include_model_index: i32,
	pub virtual_model: i32,
	pub anim_blocks_name_index: i32,
	pub anim_blocks_count: i32,
	pub anim_blocks_index: i32,
	pub anim_block_model: i32,
	pub bone_table_name_index: i32,
	pub vertex_base: i32,
	pub offset_base: i32,

	pub directional_dot_product: u8,
	pub root_lod: u8,
	pub num_allowed_root_lods: u8,

	pub flex_controller_ui_count: i32,
	pub flex_controller_ui_index: i32,

	pub header2_index: i32,
	pub header2: Option<Header2>,
}

impl Header {
	/// Decodes a studiomdl header from the start of `data`.
	#[cfg(feature = "import")]
	pub fn decode(data: &[u8]) -> Result<Header, MdlImportError> {
		Header::read(&mut Cursor::new(data))
	}

	/// Drives `cur` through the on-disk field order. Positional reads;
	/// the order below is load-bearing.
	#[cfg(feature = "import")]
	pub fn read(cur: &mut Cursor) -> Result<Header, MdlImportError> {
		let magic = cur.read_u32()?;					// 0x00
		if magic != MAGIC {
			return Err(MdlImportError::Magic(magic));
		}

		let version = cur.read_i32()?;					// 0x04
		let checksum = cur.read_i32()?;					// 0x08

		if version < MIN_VERSION || version > MAX_VERSION {
			return Err(MdlImportError::Version(version));
		}

		let name = cur.read_fixed_str(64)?;				// 0x0C
		let data_length = cur.read_i32()?;				// 0x4C

		let eye_position = cur.read_vec3()?;				// 0x50
		let illum_position = cur.read_vec3()?;
		let hull_min = cur.read_vec3()?;
		let hull_max = cur.read_vec3()?;
		let view_bb_min = cur.read_vec3()?;
		let view_bb_max = cur.read_vec3()?;

		let flags = ModelFlags::from_bits_truncate(cur.read_u32()?);	// 0x98

		// Section index run, gapless in versions 44 through 48
		let bone_count = cur.read_i32()?;				// 0x9C
		let bone_index = cur.read_i32()?;
		let bone_controller_count = cur.read_i32()?;
		let bone_controller_index = cur.read_i32()?;
		let hitbox_count = cur.read_i32()?;
		let hitbox_index = cur.read_i32()?;
		let local_anim_count = cur.read_i32()?;
		let local_anim_index = cur.read_i32()?;
		let local_sequence_count = cur.read_i32()?;
		let local_sequence_index = cur.read_i32()?;
		let activity_list_version = cur.read_i32()?;
		let events_indexed = cur.read_i32()?;
		let texture_count = cur.read_i32()?;
		let texture_index = cur.read_i32()?;
		let texture_dir_count = cur.read_i32()?;
		let texture_dir_index = cur.read_i32()?;
		let skin_reference_count = cur.read_i32()?;
		let skin_family_count = cur.read_i32()?;
		let skin_ref_index = cur.read_i32()?;
		let body_part_count = cur.read_i32()?;
		let body_part_index = cur.read_i32()?;
		let attachment_count = cur.read_i32()?;
		let attachment_index = cur.read_i32()?;
		let local_node_count = cur.read_i32()?;
		let local_node_index = cur.read_i32()?;
		let local_node_name_index = cur.read_i32()?;
		let flex_desc_count = cur.read_i32()?;
		let flex_desc_index = cur.read_i32()?;
		let flex_controller_count = cur.read_i32()?;
		let flex_controller_index = cur.read_i32()?;
		let flex_rules_count = cur.read_i32()?;
		let flex_rules_index = cur.read_i32()?;
		let ik_chain_count = cur.read_i32()?;
		let ik_chain_index = cur.read_i32()?;
		let mouths_count = cur.read_i32()?;
		let mouths_index = cur.read_i32()?;
		let local_pose_param_count = cur.read_i32()?;
		let local_pose_param_index = cur.read_i32()?;

		// The run above lands here on its own in this version window;
		// the jump pins the position for layouts with trailing gaps
		cur.jump_to(SECOND_BLOCK)?;

		let surface_prop_index = cur.read_i32()?;			// 0x134
		let key_value_index = cur.read_i32()?;
		let key_value_count = cur.read_i32()?;
		let ik_lock_count = cur.read_i32()?;
		let ik_lock_index = cur.read_i32()?;
		let mass = cur.read_f32()?;					// 0x148
		let contents = cur.read_i32()?;
		let include_model_count = cur.read_i32()?;
		let include_model_index = cur.read_i32()?;
		let virtual_model = cur.read_i32()?;
		let anim_blocks_name_index = cur.read_i32()?;
		let anim_blocks_count = cur.read_i32()?;
		let anim_blocks_index = cur.read_i32()?;
		let anim_block_model = cur.read_i32()?;
		let bone_table_name_index = cur.read_i32()?;
		let vertex_base = cur.read_i32()?;
		let offset_base = cur.read_i32()?;

		let directional_dot_product = cur.read_u8()?;			// 0x178
		let root_lod = cur.read_u8()?;
		let num_allowed_root_lods = cur.read_u8()?;

		cur.skip(5)?;	// reserved

		let flex_controller_ui_count = cur.read_i32()?;			// 0x180
		let flex_controller_ui_index = cur.read_i32()?;

		let header2_index = cur.read_i32()?;				// 0x188

		let header2 = if header2_index > 0 {
			cur.jump_to(header2_index as usize)?;

			Some(Header2 {
				src_bone_transform_count: cur.read_i32()?,
				src_bone_transform_index: cur.read_i32()?,
				illum_position_attachment_index: cur.read_i32()?,
				max_eye_deflection: cur.read_f32()?,
				linear_bone_index: cur.read_i32()?,
			})
		} else {
			None
		};

		Ok(Header {
			magic,
			version,
			checksum,
			name,
			data_length,
			eye_position,
			illum_position,
			hull_min,
			hull_max,
			view_bb_min,
			view_bb_max,
			flags,
			bone_count,
			bone_index,
			bone_controller_count,
			bone_controller_index,
			hitbox_count,
			hitbox_index,
			local_anim_count,
			local_anim_index,
			local_sequence_count,
			local_sequence_index,
			activity_list_version,
			events_indexed,
			texture_count,
			texture_index,
			texture_dir_count,
			texture_dir_index,
			skin_reference_count,
			skin_family_count,
			skin_ref_index,
			body_part_count,
			body_part_index,
			attachment_count,
			attachment_index,
			local_node_count,
			local_node_index,
			local_node_name_index,
			flex_desc_count,
			flex_desc_index,
			flex_controller_count,
			flex_controller_index,
			flex_rules_count,
			flex_rules_index,
			ik_chain_count,
			ik_chain_index,
			mouths_count,
			mouths_index,
			local_pose_param_count,
			local_pose_param_index,
			surface_prop_index,
			key_value_index,
			key_value_count,
			ik_lock_count,
			ik_lock_index,
			mass,
			contents,
			include_model_count,
			include_model_index,
			virtual_model,
			anim_blocks_name_index,
			anim_blocks_count,
			anim_blocks_index,
			anim_block_model,
			bone_table_name_index,
			vertex_base,
			offset_base,
			directional_dot_product,
			root_lod,
			num_allowed_root_lods,
			flex_controller_ui_count,
			flex_controller_ui_index,
			header2_index,
			header2,
		})
	}

	/// Source bone transform count, 0 without a second header
	pub fn src_bone_transform_count(&self) -> i32 {
		self.header2.map_or(0, |h| h.src_bone_transform_count)
	}

	/// Source bone transform index, 0 without a second header
	pub fn src_bone_transform_index(&self) -> i32 {
		self.header2.map_or(0, |h| h.src_bone_transform_index)
	}

	/// Illumination position attachment, -1 without a second header
	pub fn illum_position_attachment_index(&self) -> i32 {
		self.header2.map_or(-1, |h| h.illum_position_attachment_index)
	}

	/// Maximum eye deflection angle, 0 without a second header
	pub fn max_eye_deflection(&self) -> f32 {
		self.header2.map_or(0.0, |h| h.max_eye_deflection)
	}

	/// Linear bone table index, -1 without a second header
	pub fn linear_bone_index(&self) -> i32 {
		self.header2.map_or(-1, |h| h.linear_bone_index)
	}
}

#[cfg(feature = "export")]
pub mod export {
	use byteorder::{
		LE,
		WriteBytesExt
	};

	use std::io::{
		Result,
		Write
	};

	use ultraviolet::vec::Vec3;

	use super::*;

	impl Header {
		/// Writes the header in on-disk field order. A present second
		/// header is appended right after the main block, with its
		/// offset field re-derived; an absent one writes offset 0.
		pub fn write<W>(&self, buf: &mut W) -> Result<()>
		where
			W: Write,
		{
			buf.write_u32::<LE>(self.magic)?;
			buf.write_i32::<LE>(self.version)?;
			buf.write_i32::<LE>(self.checksum)?;

			let mut name = [0; 64];
			for (i, b) in self.name.bytes().take(64).enumerate() {
				name[i] = b;
			}
			buf.write_all(&name)?;

			buf.write_i32::<LE>(self.data_length)?;

			write_vec3(buf, self.eye_position)?;
			write_vec3(buf, self.illum_position)?;
			write_vec3(buf, self.hull_min)?;
			write_vec3(buf, self.hull_max)?;
			write_vec3(buf, self.view_bb_min)?;
			write_vec3(buf, self.view_bb_max)?;

			buf.write_u32::<LE>(self.flags.bits())?;

			buf.write_i32::<LE>(self.bone_count)?;
			buf.write_i32::<LE>(self.bone_index)?;
			buf.write_i32::<LE>(self.bone_controller_count)?;
			buf.write_i32::<LE>(self.bone_controller_index)?;
			buf.write_i32::<LE>(self.hitbox_count)?;
			buf.write_i32::<LE>(self.hitbox_index)?;
			buf.write_i32::<LE>(self.local_anim_count)?;
			buf.write_i32::<LE>(self.local_anim_index)?;
			buf.write_i32::<LE>(self.local_sequence_count)?;
			buf.write_i32::<LE>(self.local_sequence_index)?;
			buf.write_i32::<LE>(self.activity_list_version)?;
			buf.write_i32::<LE>(self.events_indexed)?;
			buf.write_i32::<LE>(self.texture_count)?;
			buf.write_i32::<LE>(self.texture_index)?;
			buf.write_i32::<LE>(self.texture_dir_count)?;
			buf.write_i32::<LE>(self.texture_dir_index)?;
			buf.write_i32::<LE>(self.skin_reference_count)?;
			buf.write_i32::<LE>(self.skin_family_count)?;
			buf.write_i32::<LE>(self.skin_ref_index)?;
			buf.write_i32::<LE>(self.body_part_count)?;
			buf.write_i32::<LE>(self.body_part_index)?;
			buf.write_i32::<LE>(self.attachment_count)?;
			buf.write_i32::<LE>(self.attachment_index)?;
			buf.write_i32::<LE>(self.local_node_count)?;
			buf.write_i32::<LE>(self.local_node_index)?;
			buf.write_i32::<LE>(self.local_node_name_index)?;
			buf.write_i32::<LE>(self.flex_desc_count)?;
			buf.write_i32::<LE>(self.flex_desc_index)?;
			buf.write_i32::<LE>(self.flex_controller_count)?;
			buf.write_i32::<LE>(self.flex_controller_index)?;
			buf.write_i32::<LE>(self.flex_rules_count)?;
			buf.write_i32::<LE>(self.flex_rules_index)?;
			buf.write_i32::<LE>(self.ik_chain_count)?;
			buf.write_i32::<LE>(self.ik_chain_index)?;
			buf.write_i32::<LE>(self.mouths_count)?;
			buf.write_i32::<LE>(self.mouths_index)?;
			buf.write_i32::<LE>(self.local_pose_param_count)?;
			buf.write_i32::<LE>(self.local_pose_param_index)?;

			// The run above ends flush against SECOND_BLOCK

			buf.write_i32::<LE>(self.surface_prop_index)?;
			buf.write_i32::<LE>(self.key_value_index)?;
			buf.write_i32::<LE>(self.key_value_count)?;
			buf.write_i32::<LE>(self.ik_lock_count)?;
			buf.write_i32::<LE>(self.ik_lock_index)?;
			buf.write_f32::<LE>(self.mass)?;
			buf.write_i32::<LE>(self.contents)?;
			buf.write_i32::<LE>(self.include_model_count)?;
			buf.write_i32::<LE>(self.include_model_index)?;
			buf.write_i32::<LE>(self.virtual_model)?;
			buf.write_i32::<LE>(self.anim_blocks_name_index)?;
			buf.write_i32::<LE>(self.anim_blocks_count)?;
			buf.write_i32::<LE>(self.anim_blocks_index)?;
			buf.write_i32::<LE>(self.anim_block_model)?;
			buf.write_i32::<LE>(self.bone_table_name_index)?;
			buf.write_i32::<LE>(self.vertex_base)?;
			buf.write_i32::<LE>(self.offset_base)?;

			buf.write_u8(self.directional_dot_product)?;
			buf.write_u8(self.root_lod)?;
			buf.write_u8(self.num_allowed_root_lods)?;

			buf.write_all(&[0; 5])?;	// reserved

			buf.write_i32::<LE>(self.flex_controller_ui_count)?;
			buf.write_i32::<LE>(self.flex_controller_ui_index)?;

			match self.header2 {
				Some(h2) => {
					buf.write_i32::<LE>(HEADER_SIZE as i32)?;

					buf.write_i32::<LE>(h2.src_bone_transform_count)?;
					buf.write_i32::<LE>(h2.src_bone_transform_index)?;
					buf.write_i32::<LE>(h2.illum_position_attachment_index)?;
					buf.write_f32::<LE>(h2.max_eye_deflection)?;
					buf.write_i32::<LE>(h2.linear_bone_index)?;
				},
				None => buf.write_i32::<LE>(0)?,
			}

			Ok(())
		}
	}

	fn write_vec3<W>(buf: &mut W, v: Vec3) -> Result<()>
	where
		W: Write,
	{
		buf.write_f32::<LE>(v.x)?;
		buf.write_f32::<LE>(v.y)?;
		buf.write_f32::<LE>(v.z)
	}

}

#[cfg(feature = "import")]
pub mod import {
	use thiserror::Error;

	use sik_core::cursor::CursorError;

	#[derive(Debug, Error)]
	pub enum MdlImportError {
		#[error("Not a Source engine model file: {0:X}")]
		Magic(u32),
		#[error("Unsupported MDL version: {0}")]
		Version(i32),
		#[error("Malformed MDL header")]
		Cursor {
			#[from]
			source: CursorError,
		},
	}

	#[cfg(test)]
	mod tests {
		use sik_core::cursor::Cursor;

		use super::super::*;
		use super::*;

		/// Assembles a minimal well-formed main header block. The section
		/// index run is filled with 1000 + n, the block past 0x134 with
		/// 2000 + n, so every field decodes to a recognizable value.
		fn sample(version: i32, flags: u32, header2_index: i32) -> Vec<u8> {
			let mut buf = vec![];

			buf.extend_from_slice(b"IDST");
			buf.extend_from_slice(&version.to_le_bytes());
			buf.extend_from_slice(&0x1BADD00Di32.to_le_bytes());

			let mut name = [0; 64];
			name[..19].copy_from_slice(b"weapons/crowbar.mdl");
			buf.extend_from_slice(&name);

			buf.extend_from_slice(&77777i32.to_le_bytes());

			for n in 0..18 {
				buf.extend_from_slice(&(n as f32 * 0.5).to_le_bytes());
			}

			buf.extend_from_slice(&flags.to_le_bytes());

			for n in 1000..1038i32 {
				buf.extend_from_slice(&n.to_le_bytes());
			}

			assert_eq!(buf.len(), SECOND_BLOCK);

			for n in 2000..2005i32 {
				buf.extend_from_slice(&n.to_le_bytes());
			}

			buf.extend_from_slice(&35.5f32.to_le_bytes());

			for n in 2005..2016i32 {
				buf.extend_from_slice(&n.to_le_bytes());
			}

			buf.extend_from_slice(&[230, 0, 2]);
			buf.extend_from_slice(&[0xEE; 5]);

			buf.extend_from_slice(&3000i32.to_le_bytes());
			buf.extend_from_slice(&3001i32.to_le_bytes());
			buf.extend_from_slice(&header2_index.to_le_bytes());

			assert_eq!(buf.len(), HEADER_SIZE);

			buf
		}

		#[test]
		fn test_main_fields() {
			let header = Header::decode(&sample(45, 0x10, 0)).unwrap();

			assert_eq!(header.magic, MAGIC);
			assert_eq!(header.version, 45);
			assert_eq!(header.checksum, 0x1BADD00D);
			assert_eq!(header.name, "weapons/crowbar.mdl");
			assert_eq!(header.data_length, 77777);

			assert_eq!(header.eye_position, Vec3::new(0.0, 0.5, 1.0));
			assert_eq!(header.illum_position, Vec3::new(1.5, 2.0, 2.5));
			assert_eq!(header.hull_min, Vec3::new(3.0, 3.5, 4.0));
			assert_eq!(header.hull_max, Vec3::new(4.5, 5.0, 5.5));
			assert_eq!(header.view_bb_min, Vec3::new(6.0, 6.5, 7.0));
			assert_eq!(header.view_bb_max, Vec3::new(7.5, 8.0, 8.5));

			assert_eq!(header.bone_count, 1000);
			assert_eq!(header.bone_index, 1001);
			assert_eq!(header.local_sequence_count, 1008);
			assert_eq!(header.activity_list_version, 1010);
			assert_eq!(header.events_indexed, 1011);
			assert_eq!(header.skin_reference_count, 1016);
			assert_eq!(header.skin_family_count, 1017);
			assert_eq!(header.skin_ref_index, 1018);
			assert_eq!(header.local_node_name_index, 1025);
			assert_eq!(header.mouths_count, 1034);
			assert_eq!(header.local_pose_param_count, 1036);
			assert_eq!(header.local_pose_param_index, 1037);

			assert_eq!(header.surface_prop_index, 2000);
			assert_eq!(header.key_value_index, 2001);
			assert_eq!(header.key_value_count, 2002);
			assert_eq!(header.ik_lock_count, 2003);
			assert_eq!(header.ik_lock_index, 2004);
			assert_eq!(header.mass, 35.5);
			assert_eq!(header.contents, 2005);
			assert_eq!(header.virtual_model, 2008);
			assert_eq!(header.anim_block_model, 2012);
			assert_eq!(header.bone_table_name_index, 2013);
			assert_eq!(header.vertex_base, 2014);
			assert_eq!(header.offset_base, 2015);

			assert_eq!(header.directional_dot_product, 230);
			assert_eq!(header.root_lod, 0);
			assert_eq!(header.num_allowed_root_lods, 2);

			assert_eq!(header.flex_controller_ui_count, 3000);
			assert_eq!(header.flex_controller_ui_index, 3001);
		}

		#[test]
		fn test_bad_magic() {
			let mut data = sample(48, 0, 0);
			data[..4].copy_from_slice(b"IDSQ");

			// Wrong tag fails no matter what follows
			assert!(matches!(
				Header::decode(&data),
				Err(MdlImportError::Magic(_))
			));
		}

		#[test]
		fn test_version_below_range() {
			assert!(matches!(
				Header::decode(&sample(43, 0, 0)),
				Err(MdlImportError::Version(43))
			));
		}

		#[test]
		fn test_version_above_range() {
			assert!(matches!(
				Header::decode(&sample(49, 0, 0)),
				Err(MdlImportError::Version(49))
			));
		}

		#[test]
		fn test_truncated() {
			let data = sample(48, 0, 0);

			for len in [0, 3, 30, 100, 0x134, HEADER_SIZE - 1] {
				assert!(matches!(
					Header::decode(&data[..len]),
					Err(MdlImportError::Cursor {
						source: CursorError::Truncated { .. },
					})
				), "len {}", len);
			}
		}

		#[test]
		fn test_no_header2_sentinels() {
			let header = Header::decode(&sample(48, 0, 0)).unwrap();

			assert_eq!(header.header2, None);
			assert_eq!(header.src_bone_transform_count(), 0);
			assert_eq!(header.src_bone_transform_index(), 0);
			assert_eq!(header.illum_position_attachment_index(), -1);
			assert_eq!(header.max_eye_deflection(), 0.0);
			assert_eq!(header.linear_bone_index(), -1);
		}

		#[test]
		fn test_negative_header2_index() {
			let header = Header::decode(&sample(48, 0, -44)).unwrap();

			assert_eq!(header.header2_index, -44);
			assert_eq!(header.header2, None);
		}

		#[test]
		fn test_stops_after_offset_field() {
			let mut data = sample(48, 0, 0);
			data.extend_from_slice(&[0xAB; 64]);	// trailing section data

			let mut cur = Cursor::new(&data);
			Header::read(&mut cur).unwrap();

			assert_eq!(cur.pos(), HEADER_SIZE);
		}

		#[test]
		fn test_header2() {
			let mut data = sample(48, 0, HEADER_SIZE as i32 + 8);
			data.extend_from_slice(&[0; 8]);	// unrelated bytes before the block
			data.extend_from_slice(&6i32.to_le_bytes());
			data.extend_from_slice(&4444i32.to_le_bytes());
			data.extend_from_slice(&2i32.to_le_bytes());
			data.extend_from_slice(&0.25f32.to_le_bytes());
			data.extend_from_slice(&512i32.to_le_bytes());

			let header = Header::decode(&data).unwrap();

			assert_eq!(header.header2, Some(Header2 {
				src_bone_transform_count: 6,
				src_bone_transform_index: 4444,
				illum_position_attachment_index: 2,
				max_eye_deflection: 0.25,
				linear_bone_index: 512,
			}));

			assert_eq!(header.src_bone_transform_count(), 6);
			assert_eq!(header.src_bone_transform_index(), 4444);
			assert_eq!(header.illum_position_attachment_index(), 2);
			assert_eq!(header.max_eye_deflection(), 0.25);
			assert_eq!(header.linear_bone_index(), 512);
		}

		#[test]
		fn test_header2_does_not_disturb_main_fields() {
			let plain = Header::decode(&sample(48, 0x10, 0)).unwrap();

			let mut data = sample(48, 0x10, HEADER_SIZE as i32);
			data.extend_from_slice(&[0; HEADER2_SIZE]);
			let extended = Header::decode(&data).unwrap();

			let mut stripped = extended.clone();
			stripped.header2 = None;
			stripped.header2_index = 0;

			assert_eq!(stripped, plain);
		}

		#[test]
		fn test_header2_offset_out_of_bounds() {
			assert!(matches!(
				Header::decode(&sample(48, 0, 50000)),
				Err(MdlImportError::Cursor {
					source: CursorError::Offset(50000),
				})
			));
		}

		#[test]
		fn test_header2_truncated() {
			// Offset lands in bounds but the block itself is cut short
			let mut data = sample(48, 0, HEADER_SIZE as i32);
			data.extend_from_slice(&[0; HEADER2_SIZE - 4]);

			assert!(matches!(
				Header::decode(&data),
				Err(MdlImportError::Cursor {
					source: CursorError::Truncated { .. },
				})
			));
		}

		#[test]
		fn test_flags() {
			let bits = ModelFlags::STATIC_PROP | ModelFlags::DO_NOT_CAST_SHADOWS;
			let header = Header::decode(&sample(48, bits.bits(), 0)).unwrap();

			assert_eq!(header.flags, bits);
			assert!(header.flags.contains(ModelFlags::STATIC_PROP));
			assert!(header.flags.contains(ModelFlags::DO_NOT_CAST_SHADOWS));
			assert!(!header.flags.intersects(
				ModelFlags::all() - ModelFlags::STATIC_PROP - ModelFlags::DO_NOT_CAST_SHADOWS
			));
		}
	}
}
