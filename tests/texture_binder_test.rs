use castle_scene::{
    data_structures::texture::{clamped_sampler_descriptor, fit_within},
    resources::texture::{ImageSource, TextureError, bind_textures, load_material_images},
    scene::Material,
};

fn sources(ids: &[&str]) -> Vec<ImageSource> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| ImageSource::solid(*id, [i as u8, 0, 0, 255]))
        .collect()
}

#[test]
fn handles_keep_the_order_of_the_image_list() {
    let images = sources(&["stone", "door", "house"]);
    let set = bind_textures(&images, |source| source.id.clone()).unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(set.ids(), ["stone", "door", "house"]);
    for (i, source) in images.iter().enumerate() {
        assert_eq!(set.get(i), Some(&source.id));
        assert_eq!(set.index_of(&source.id), Some(i));
    }
}

#[test]
fn binding_twice_gives_the_same_positions() {
    let images = sources(&["bark", "leaves", "path", "water"]);
    let first = bind_textures(&images, |source| source.image.to_rgba8().get_pixel(0, 0)[0]).unwrap();
    let second = bind_textures(&images, |source| source.image.to_rgba8().get_pixel(0, 0)[0]).unwrap();
    let first: Vec<_> = first.iter().map(|(id, h)| (id.to_string(), *h)).collect();
    let second: Vec<_> = second.iter().map(|(id, h)| (id.to_string(), *h)).collect();
    assert_eq!(first, second);
    assert_eq!(first[2], ("path".to_string(), 2));
}

#[test]
fn every_source_is_uploaded_exactly_once() {
    let images = sources(&["a", "b", "c", "d"]);
    let mut uploads = 0;
    let set = bind_textures(&images, |_| {
        uploads += 1;
        uploads
    })
    .unwrap();
    assert_eq!(uploads, 4);
    assert_eq!(set.by_id("d"), Some(&4));
    assert_eq!(set.by_id("e"), None);
}

#[test]
fn duplicate_ids_are_rejected() {
    let images = sources(&["grass", "water", "grass"]);
    assert_eq!(
        bind_textures(&images, |_| ()).unwrap_err(),
        TextureError::DuplicateId("grass".to_string())
    );
}

#[test]
fn empty_list_binds_nothing() {
    let set = bind_textures(&[], |_: &ImageSource| ()).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.get(0), None);
}

#[test]
fn solid_image_is_a_small_single_colour_patch() {
    let source = ImageSource::solid("leaves", [10, 120, 30, 255]);
    let rgba = source.image.to_rgba8();
    assert_eq!(rgba.dimensions(), (2, 2));
    assert!(rgba.pixels().all(|p| p.0 == [10, 120, 30, 255]));
}

#[test]
fn missing_images_fall_back_to_material_colours() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let loaded = runtime.block_on(load_material_images("no-such-texture-dir"));

    assert_eq!(loaded.len(), Material::ALL.len());
    for (source, material) in loaded.iter().zip(Material::ALL) {
        assert_eq!(source.id, material.id());
        let pixel = source.image.to_rgba8().get_pixel(0, 0).0;
        assert_eq!(pixel, material.fallback_colour());
    }

    let set = bind_textures(&loaded, |source| source.id.len()).unwrap();
    for material in Material::ALL {
        assert_eq!(set.index_of(material.id()), Some(material.index()));
    }
}

#[test]
fn images_within_the_limit_are_left_alone() {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(2048, 512));
    assert!(fit_within(&img, 2048).is_none());
}

#[test]
fn oversized_images_shrink_keeping_their_aspect() {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(4096, 1024));
    let fitted = fit_within(&img, 2048).unwrap();
    assert_eq!((fitted.width(), fitted.height()), (2048, 512));

    let tall = image::DynamicImage::ImageRgba8(image::RgbaImage::new(300, 9000));
    let fitted = fit_within(&tall, 2048).unwrap();
    assert_eq!(fitted.height(), 2048);
    assert!(fitted.width() <= 2048);
}

#[test]
fn sampler_clamps_and_filters_linearly() {
    let desc = clamped_sampler_descriptor();
    assert_eq!(desc.address_mode_u, wgpu::AddressMode::ClampToEdge);
    assert_eq!(desc.address_mode_v, wgpu::AddressMode::ClampToEdge);
    assert_eq!(desc.mag_filter, wgpu::FilterMode::Linear);
    assert_eq!(desc.min_filter, wgpu::FilterMode::Linear);
}
