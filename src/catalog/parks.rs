//! Built-in park list for the East Bay Regional Park District.
//! Cities follow the district's own listing.

use super::ParkId;

pub struct ParkEntry {
    pub id: ParkId,
    pub name: &'static str,
    pub city: &'static str,
    pub county: &'static str,
    pub acres: f64,
    pub lat: f64,
    pub lng: f64,
    pub description: &'static str,
}

const ALAMEDA: &str = "Alameda";
const CONTRA_COSTA: &str = "Contra Costa";

#[allow(clippy::too_many_arguments)]
const fn entry(
    id: ParkId,
    name: &'static str,
    city: &'static str,
    county: &'static str,
    acres: f64,
    lat: f64,
    lng: f64,
    description: &'static str,
) -> ParkEntry {
    ParkEntry { id, name, city, county, acres, lat, lng, description }
}

pub const PARKS: &[ParkEntry] = &[
    entry(1, "Anthony Chabot Regional Park", "Castro Valley", ALAMEDA, 3341.0, 37.7296, -122.1009,
        "Eucalyptus and oak woodland ridges above Lake Chabot with a large family campground."),
    entry(2, "Antioch/Oakley Regional Shoreline", "Antioch", CONTRA_COSTA, 7.0, 38.0177, -121.7516,
        "Small river-edge park with a fishing pier on the San Joaquin River."),
    entry(3, "Ardenwood Historic Farm", "Fremont", ALAMEDA, 208.0, 37.5586, -122.0496,
        "Working 1890s farm with a Victorian mansion, farm animals and a horse-drawn railroad."),
    entry(4, "Bay Point Regional Shoreline", "Bay Point", CONTRA_COSTA, 120.0, 38.0379, -121.9632,
        "Tidal marsh and shoreline trail along Suisun Bay."),
    entry(5, "Big Break Regional Shoreline", "Oakley", CONTRA_COSTA, 1648.0, 38.0128, -121.7266,
        "Delta shoreline with a visitor center, interactive delta map and kayak launch."),
    entry(6, "Bishop Ranch Open Space Regional Preserve", "San Ramon", CONTRA_COSTA, 400.0, 37.7577, -121.9932,
        "Grassy hills with views of Mount Diablo and the San Ramon Valley."),
    entry(7, "Black Diamond Mines Regional Preserve", "Antioch", CONTRA_COSTA, 8416.0, 37.9570, -121.8627,
        "Former coal and sand mining district with underground mine tours and a pioneer cemetery."),
    entry(8, "Briones Regional Park", "Lafayette", CONTRA_COSTA, 6255.0, 37.9247, -122.1528,
        "Rolling grassland and oak woodland with archery range and seasonal wildflowers."),
    entry(9, "Brooks Island Regional Preserve", "Richmond", CONTRA_COSTA, 373.0, 37.8964, -122.3558,
        "Island preserve off the Richmond shoreline, reachable on naturalist-led trips."),
    entry(10, "Browns Island", "Pittsburg", CONTRA_COSTA, 595.0, 38.0395, -121.8650,
        "Undiked tidal marsh island at the mouth of the delta."),
    entry(11, "Brushy Peak Regional Preserve", "Livermore", ALAMEDA, 1702.0, 37.7228, -121.7099,
        "Sandstone outcrops and raptor habitat in the Altamont Hills."),
    entry(12, "Carquinez Strait Regional Shoreline", "Martinez", CONTRA_COSTA, 1415.0, 38.0244, -122.1737,
        "Bluff-top trails with sweeping views over the Carquinez Strait."),
    entry(13, "Castle Rock Regional Recreation Area", "Walnut Creek", CONTRA_COSTA, 35.0, 37.8842, -121.9942,
        "Picnic grounds and pool at the foot of Mount Diablo."),
    entry(14, "Tilden (Charles Lee Tilden) Regional Park", "Berkeley", CONTRA_COSTA, 2079.0, 37.8936, -122.2446,
        "Classic hill park with a carousel, steam trains, Lake Anza and a golf course."),
    entry(15, "Claremont Canyon Regional Preserve", "Berkeley", ALAMEDA, 208.0, 37.8637, -122.2365,
        "Steep canyon above the Claremont district with bay views."),
    entry(16, "Contra Loma Regional Park", "Antioch", CONTRA_COSTA, 776.0, 37.9743, -121.8277,
        "Reservoir park with a swim lagoon, fishing and windsurfing."),
    entry(17, "Coyote Hills Regional Park", "Fremont", ALAMEDA, 978.0, 37.5548, -122.0902,
        "Marshland and hills with Ohlone shellmound sites and a visitor center."),
    entry(18, "Crockett Hills Regional Park", "Crockett", CONTRA_COSTA, 1939.0, 38.0373, -122.2045,
        "Open grassland with oak and bay woodland above the Carquinez Strait."),
    entry(19, "Cull Canyon Regional Recreation Area", "Castro Valley", ALAMEDA, 360.0, 37.7225, -122.0533,
        "Small reservoir with fishing and picnic areas in a wooded canyon."),
    entry(20, "Deer Valley Regional Park", "Antioch", CONTRA_COSTA, 2205.0, 37.9380, -121.7975,
        "Open ridges and valleys east of Black Diamond Mines."),
    entry(21, "Del Valle Regional Park", "Livermore", ALAMEDA, 4395.0, 37.5801, -121.7011,
        "Five-mile lake with boating, swimming and a gateway to the Ohlone Wilderness."),
    entry(22, "Diablo Foothills Regional Park", "Walnut Creek", CONTRA_COSTA, 1060.0, 37.8862, -122.0112,
        "Foothill grassland with the Castle Rocks sandstone formations."),
    entry(23, "Don Castro Regional Recreation Area", "Hayward", ALAMEDA, 101.0, 37.6935, -122.0577,
        "Swim lagoon and fishing lake in the Hayward hills."),
    entry(24, "Redwood (Dr. Aurelia Reinhardt Redwood) Regional Park", "Oakland", ALAMEDA, 1836.0, 37.8169, -122.1688,
        "Second-growth coast redwoods and Redwood Creek, home of the rainbow trout."),
    entry(25, "Dublin Hills Regional Park", "Dublin", ALAMEDA, 650.0, 37.7063, -121.9545,
        "Grassy ridges with views over the Tri-Valley."),
    entry(26, "Dumbarton Quarry Campground on the Bay", "Fremont", ALAMEDA, 91.0, 37.5210, -122.0710,
        "Reclaimed quarry turned campground near the Dumbarton Bridge."),
    entry(27, "Five Canyons Open Space", "Castro Valley", ALAMEDA, 429.0, 37.7062, -122.0300,
        "Neighborhood open space with connector trails toward Don Castro."),
    entry(28, "Garin Regional Park", "Hayward", ALAMEDA, 1020.0, 37.6300, -122.0276,
        "Historic ranch land with an apple orchard and ridge-top bay views."),
    entry(29, "Dry Creek Pioneer Regional Park", "Fremont", ALAMEDA, 1841.0, 37.6035, -122.0094,
        "Former ranch property with Dry Creek cascades and hillside trails."),
    entry(30, "Hayward Regional Shoreline", "Hayward", ALAMEDA, 1811.0, 37.6213, -122.1428,
        "Restored salt marsh with the Hayward Shoreline Interpretive Center."),
    entry(31, "Huckleberry Botanic Regional Preserve", "Oakland", CONTRA_COSTA, 241.0, 37.8446, -122.1949,
        "Rare native plant community with a self-guided nature path."),
    entry(32, "Judge John Sutter Regional Shoreline", "Antioch", ALAMEDA, 22.0, 37.8260, -122.3000,
        "Former army base pier at the foot of the Bay Bridge."),
    entry(33, "Kennedy Grove Regional Recreation Area", "El Sobrante", CONTRA_COSTA, 222.0, 37.9460, -122.2700,
        "Eucalyptus grove with large group picnic areas below San Pablo Dam."),
    entry(34, "Lake Chabot Regional Park", "Castro Valley", ALAMEDA, 3315.0, 37.7210, -122.1140,
        "Lake with boat rentals, fishing and a paved lakeside trail."),
    entry(35, "Las Trampas Wilderness Regional Preserve", "San Ramon", CONTRA_COSTA, 5342.0, 37.8180, -122.0490,
        "Rugged ridgelines with wind caves and chaparral."),
    entry(36, "Leona Canyon Regional Open Space Preserve", "Oakland", ALAMEDA, 290.0, 37.7670, -122.1330,
        "Wooded canyon with a creekside trail and spring wildflowers."),
    entry(37, "Little Hills Regional Recreation Area", "San Pablo", CONTRA_COSTA, 25.0, 37.9580, -122.2700,
        "Reservation-only picnic site with a creek and lawns."),
    entry(38, "Martin Luther King Jr. Regional Shoreline", "Oakland", ALAMEDA, 1220.0, 37.7450, -122.2050,
        "Bayside marshes, Arrowhead Marsh and paved shoreline paths."),
    entry(39, "McLaughlin Eastshore State Park", "Berkeley", ALAMEDA, 1854.0, 37.8690, -122.3080,
        "Shoreline park stretching from the Bay Bridge to Richmond."),
    entry(40, "Miller/Knox Regional Shoreline", "Richmond", CONTRA_COSTA, 307.0, 37.9130, -122.3860,
        "Lagoon, beach and hilltop views of the Golden Gate."),
    entry(41, "Mission Peak Regional Preserve", "Fremont", ALAMEDA, 3000.0, 37.5126, -121.8807,
        "Iconic summit hike with a sighting post and panoramic views."),
    entry(42, "Morgan Territory Regional Preserve", "Clayton", CONTRA_COSTA, 5195.0, 37.8250, -121.8000,
        "Remote ridges on the east flank of Mount Diablo."),
    entry(43, "Ohlone Wilderness Regional Preserve", "Fremont", ALAMEDA, 9737.0, 37.5150, -121.7950,
        "Backcountry wilderness crossed by the 28-mile Ohlone Wilderness Trail."),
    entry(44, "Oyster Bay Regional Shoreline", "San Leandro", ALAMEDA, 192.0, 37.7050, -122.1900,
        "Former landfill turned bayside meadow with a disc golf course."),
    entry(45, "Pleasanton Ridge Regional Park", "Pleasanton", ALAMEDA, 9368.0, 37.6170, -121.9290,
        "Oak-studded ridgeline above the Sunol Valley."),
    entry(46, "Point Isabel Regional Shoreline", "Richmond", CONTRA_COSTA, 23.0, 37.8990, -122.3220,
        "Popular off-leash dog park along the bay."),
    entry(47, "Point Pinole Regional Shoreline", "Richmond", CONTRA_COSTA, 2315.0, 38.0040, -122.3600,
        "Bluffs, beaches and a fishing pier on San Pablo Bay."),
    entry(48, "Quarry Lakes Regional Recreation Area", "Fremont", ALAMEDA, 472.0, 37.5770, -121.9980,
        "Former gravel pits now lakes for swimming, fishing and boating."),
    entry(49, "Robert W. Crown Memorial State Beach", "Alameda", ALAMEDA, 132.0, 37.7640, -122.2620,
        "Sandy bay beach with the Crab Cove visitor center."),
    entry(50, "Roberts Regional Recreation Area", "Oakland", ALAMEDA, 100.0, 37.8230, -122.1840,
        "Redwood-shaded picnic areas and a heated swimming pool."),
    entry(51, "Round Valley Regional Preserve", "Brentwood", CONTRA_COSTA, 2183.0, 37.8580, -121.7610,
        "Secluded valley with golden eagles and San Joaquin kit fox habitat."),
    entry(52, "Shadow Cliffs Regional Recreation Area", "Pleasanton", ALAMEDA, 296.0, 37.6620, -121.8330,
        "Former gravel quarry lake with a swim beach."),
    entry(53, "Sibley Volcanic Regional Preserve", "Oakland", CONTRA_COSTA, 843.0, 37.8480, -122.1970,
        "Exposed volcanic formations and hidden stone labyrinths."),
    entry(54, "Sobrante Ridge Regional Preserve", "El Sobrante", CONTRA_COSTA, 277.0, 37.9810, -122.2560,
        "Ridge preserve protecting a rare stand of Alameda manzanita."),
    entry(55, "Sunol Wilderness Regional Preserve", "Sunol", ALAMEDA, 6859.0, 37.5150, -121.8300,
        "Alameda Creek's Little Yosemite gorge and backcountry camping."),
    entry(56, "Sycamore Valley Open Space Regional Preserve", "Danville", CONTRA_COSTA, 743.0, 37.8100, -121.9600,
        "Grassy open space between Danville and Mount Diablo."),
    entry(57, "Ted and Kathy Radke Martinez Regional Shoreline", "Martinez", CONTRA_COSTA, 343.0, 38.0240, -122.1390,
        "Marsh, ponds and ball fields beside the Martinez marina."),
    entry(58, "Temescal Regional Recreation Area", "Oakland", ALAMEDA, 48.0, 37.8450, -122.2320,
        "Small lake with a swim beach near the Caldecott Tunnel."),
    entry(59, "Thurgood Marshall Regional Park", "Berkeley", CONTRA_COSTA, 2540.0, 37.9380, -121.9810,
        "Former naval weapons station land in the Concord hills."),
    entry(60, "Tilden Nature Area", "Berkeley", CONTRA_COSTA, 740.0, 37.9100, -122.2630,
        "Environmental education center, Little Farm and Jewel Lake."),
    entry(61, "Tilden Regional Parks Botanic Garden", "Berkeley", CONTRA_COSTA, 10.0, 37.8940, -122.2400,
        "Garden of California native plants arranged by region."),
    entry(62, "Vargas Plateau Regional Park", "Fremont", ALAMEDA, 1010.0, 37.5710, -121.9530,
        "Upland plateau with views over Fremont and Niles Canyon."),
    entry(63, "Vasco Caves Regional Preserve", "Brentwood", CONTRA_COSTA, 1546.0, 37.8050, -121.6970,
        "Sandstone caves and vernal pools, visited on guided tours."),
    entry(64, "Waterbird Regional Preserve", "Antioch", CONTRA_COSTA, 205.0, 38.0200, -122.0900,
        "Seasonal wetland viewing area for migratory birds."),
    entry(65, "Wildcat Canyon Regional Park", "Richmond", CONTRA_COSTA, 2428.0, 37.9480, -122.3000,
        "Grassy ridges and Wildcat Creek north of Tilden."),
];
