//! Demonstration catalog inserted by `CatalogService::seed`.

use crate::package::{NewPackage, PackageType};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Three umrah packages followed by three general tours.
pub fn demo_packages() -> Vec<NewPackage> {
    vec![
        NewPackage {
            name: "Umrah Spesial Liburan Akhir Tahun".to_string(),
            description: "Paket Umrah 11 hari dengan fasilitas lengkap termasuk city tour Hainan".to_string(),
            price: 27_500_000,
            duration: "11 Hari".to_string(),
            package_type: PackageType::Umrah,
            departure_city: "Jakarta".to_string(),
            departure_date: "Desember 2025".to_string(),
            airline: "Garuda Indonesia".to_string(),
            hotel: "Zowr Al Baith & Grand Zowr".to_string(),
            hotel_rating: 4,
            facilities: strings(&["Tiket Pesawat", "Visa", "Transportasi", "City Tour", "Makan", "Hotel Bintang 4", "Pembimbing Ustadz"]),
            itinerary: strings(&[
                "Hari 1-2: Penerbangan Jakarta - Mekkah",
                "Hari 3-7: Ibadah Umrah di Mekkah",
                "Hari 8-10: Ziarah di Madinah",
                "Hari 11: Kepulangan",
            ]),
            image_url: "https://customer-assets.emergentagent.com/job_79e30beb-e67a-407d-a760-de0870f79c88/artifacts/q16s8grd_WhatsApp%20Image%202025-11-11%20at%2009.18.26.jpeg".to_string(),
            availability: 20,
        },
        NewPackage {
            name: "Umrah Awal Ramadhan".to_string(),
            description: "Paket Umrah 11 hari khusus awal Ramadhan dengan pembimbing berpengalaman".to_string(),
            price: 25_900_000,
            duration: "11 Hari".to_string(),
            package_type: PackageType::Umrah,
            departure_city: "Jakarta".to_string(),
            departure_date: "Maret 2026".to_string(),
            airline: "Saudia Airlines".to_string(),
            hotel: "Zowr Al Baith & Grand Zowr".to_string(),
            hotel_rating: 4,
            facilities: strings(&["Tiket Pesawat", "Visa", "Transportasi", "City Tour", "Makan", "Hotel Bintang 4", "Pembimbing Ustadz Abu Nabilah"]),
            itinerary: strings(&[
                "Hari 1-2: Penerbangan Jakarta - Mekkah",
                "Hari 3-7: Ibadah Umrah di Mekkah (Quad Room)",
                "Hari 8-10: Ziarah di Madinah",
                "Hari 11: Kepulangan",
            ]),
            image_url: "https://customer-assets.emergentagent.com/job_79e30beb-e67a-407d-a760-de0870f79c88/artifacts/brglhk86_WhatsApp%20Image%202025-11-11%20at%2009.18.28%20%281%29.jpeg".to_string(),
            availability: 25,
        },
        NewPackage {
            name: "Umrah Hemat Plus Turki".to_string(),
            description: "Paket Umrah 14 hari dengan bonus city tour Istanbul, Turki".to_string(),
            price: 35_000_000,
            duration: "14 Hari".to_string(),
            package_type: PackageType::Umrah,
            departure_city: "Jakarta".to_string(),
            departure_date: "April 2026".to_string(),
            airline: "Turkish Airlines".to_string(),
            hotel: "Hotel Bintang 5".to_string(),
            hotel_rating: 5,
            facilities: strings(&["Tiket Pesawat", "Visa", "Transportasi", "City Tour Istanbul", "Makan", "Hotel Bintang 5"]),
            itinerary: strings(&[
                "Hari 1-2: Jakarta - Istanbul (Transit)",
                "Hari 3-4: City Tour Istanbul",
                "Hari 5-9: Ibadah Umrah di Mekkah",
                "Hari 10-13: Ziarah di Madinah",
                "Hari 14: Kepulangan",
            ]),
            image_url: "https://images.unsplash.com/photo-1591604466107-ec97de577aff?w=800".to_string(),
            availability: 15,
        },
        NewPackage {
            name: "Tour Dieng".to_string(),
            description: "Paket tour Dieng 3 hari 2 malam dengan pemandangan indah".to_string(),
            price: 1_500_000,
            duration: "3 Hari 2 Malam".to_string(),
            package_type: PackageType::Tour,
            departure_city: "Semarang".to_string(),
            departure_date: "Setiap Weekend".to_string(),
            airline: "Bus Pariwisata".to_string(),
            hotel: "Hotel Dieng".to_string(),
            hotel_rating: 3,
            facilities: strings(&["Transportasi", "Hotel", "Makan", "Guide", "Tiket Wisata"]),
            itinerary: strings(&[
                "Hari 1: Penjemputan - Perjalanan ke Dieng",
                "Hari 2: Kawah Sikidang - Telaga Warna - Candi Arjuna",
                "Hari 3: Sunrise Sikunir - Kepulangan",
            ]),
            image_url: "https://images.unsplash.com/photo-1555400038-63f5ba517a47?w=800".to_string(),
            availability: 30,
        },
        NewPackage {
            name: "Bali Paradise Tour".to_string(),
            description: "Paket tour Bali 4 hari 3 malam mengunjungi tempat wisata terbaik".to_string(),
            price: 3_500_000,
            duration: "4 Hari 3 Malam".to_string(),
            package_type: PackageType::Tour,
            departure_city: "Jakarta".to_string(),
            departure_date: "Setiap Hari".to_string(),
            airline: "Garuda Indonesia".to_string(),
            hotel: "Hotel Bintang 4".to_string(),
            hotel_rating: 4,
            facilities: strings(&["Tiket Pesawat", "Hotel", "Transportasi", "Makan", "Guide", "Tiket Wisata"]),
            itinerary: strings(&[
                "Hari 1: Jakarta - Bali, Check-in Hotel",
                "Hari 2: Tanah Lot - Uluwatu - Jimbaran",
                "Hari 3: Ubud - Tegalalang - Kintamani",
                "Hari 4: Free Time - Kepulangan",
            ]),
            image_url: "https://images.unsplash.com/photo-1537996194471-e657df975ab4?w=800".to_string(),
            availability: 25,
        },
        NewPackage {
            name: "Thailand Bangkok-Pattaya".to_string(),
            description: "Tour Bangkok-Pattaya 5 hari 4 malam dengan fasilitas lengkap".to_string(),
            price: 6_500_000,
            duration: "5 Hari 4 Malam".to_string(),
            package_type: PackageType::Tour,
            departure_city: "Jakarta".to_string(),
            departure_date: "Setiap Minggu".to_string(),
            airline: "Thai Airways".to_string(),
            hotel: "Hotel Bintang 4".to_string(),
            hotel_rating: 4,
            facilities: strings(&["Tiket Pesawat", "Visa", "Hotel", "Transportasi", "Makan", "Guide"]),
            itinerary: strings(&[
                "Hari 1: Jakarta - Bangkok, City Tour",
                "Hari 2: Grand Palace - Wat Arun - Floating Market",
                "Hari 3: Bangkok - Pattaya, Alcazar Show",
                "Hari 4: Coral Island - Pattaya Beach",
                "Hari 5: Shopping - Kepulangan",
            ]),
            image_url: "https://images.unsplash.com/photo-1508009603885-50cf7c579365?w=800".to_string(),
            availability: 20,
        },
    ]
}
